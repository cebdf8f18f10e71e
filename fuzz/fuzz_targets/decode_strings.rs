#![no_main]

use libfuzzer_sys::fuzz_target;
use natder::decode::SliceSource;
use natder::encode::{PrimitiveContent, Values};
use natder::{Ia5String, Utf8String};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = SliceSource::new(data).take_ia5_string() {
        assert!(s.as_str().is_ascii());
        let encoded = s.encode().to_vec();
        assert_eq!(SliceSource::new(&encoded).take_ia5_string().unwrap(), s);
    }
    if let Ok(s) = SliceSource::new(data).take_utf8_string() {
        let wide = s.to_wide();
        assert_eq!(Utf8String::from_wide(&wide).unwrap(), s);
        let encoded = s.encode().to_vec();
        assert_eq!(
            SliceSource::new(&encoded).take_utf8_string().unwrap(), s
        );
    }
    assert_eq!(
        Ia5String::from_slice(data).is_ok(),
        data.is_ascii()
    );
});
