#![no_main]

use libfuzzer_sys::fuzz_target;
use natder::decode::SliceSource;
use natder::encode::{PrimitiveContent, Values};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = SliceSource::new(data).take_i64() {
        let encoded = value.encode().to_vec();
        assert_eq!(SliceSource::new(&encoded).take_i64().unwrap(), value);
    }
    if let Ok(value) = SliceSource::new(data).take_u64() {
        let encoded = value.encode().to_vec();
        assert_eq!(SliceSource::new(&encoded).take_u64().unwrap(), value);
    }
    if let Ok(value) = SliceSource::new(data).take_natural() {
        let encoded = value.encode().to_vec();
        assert_eq!(encoded.len(), value.encode().encoded_len());
        assert_eq!(
            SliceSource::new(&encoded).take_natural().unwrap(), value
        );
    }
    let _ = SliceSource::new(data).take_enumerated();
});
