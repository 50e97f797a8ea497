//! CRC-16/XMODEM: poly 0x1021, init 0, no reflection, no final xor.

const POLY: u16 = 0x1021;

/// Bit-at-a-time form, used by the native encoder.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for byte in data {
        crc ^= u16::from(*byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
        }
    }
    crc
}

const TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Table-driven form, used by the reference backend.
pub fn crc16_xmodem_table(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, byte| {
        let idx = ((crc >> 8) ^ u16::from(*byte)) & 0xff;
        (crc << 8) ^ TABLE[idx as usize]
    })
}
