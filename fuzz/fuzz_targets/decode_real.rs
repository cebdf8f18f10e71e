#![no_main]

use libfuzzer_sys::fuzz_target;
use natder::{Base, Real};
use natder::decode::SliceSource;
use natder::encode::{PrimitiveContent, Values};

fuzz_target!(|data: &[u8]| {
    let value = match SliceSource::new(data).take_real() {
        Ok(value) => value,
        Err(_) => return
    };
    for base in [Base::Two, Base::Eight, Base::Sixteen] {
        let encoded = Real::with_base(value, base).encode().to_vec();
        let decoded = SliceSource::new(&encoded).take_real().unwrap();
        if value.is_nan() {
            assert!(decoded.is_nan());
        }
        else {
            assert_eq!(decoded.to_bits(), value.to_bits());
        }
    }
});
