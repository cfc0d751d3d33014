#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if data.len() >= 16 {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&data[..16]);
        // Scale lives in bits 16..24 of the flags word and must be <= 28
        bytes[2] %= 29;
        bytes[0] = 0;
        bytes[1] = 0;
        bytes[3] &= 0x80;
        let amount = Decimal::deserialize(bytes);
        let _ = tallybook::core::format_currency(amount);
    }
    if data.len() >= 8 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&data[..8]);
        let _ = tallybook::core::try_format_currency(f64::from_le_bytes(raw));
    }
});
