#![no_main]

use libfuzzer_sys::fuzz_target;
use natder::Natural;

fuzz_target!(|data: &[u8]| {
    let (head, tail) = data.split_at(data.len() / 2);
    let (left, right) = tail.split_at(tail.len() / 2);
    let a = Natural::from_be_bytes(head);
    let b = Natural::from_be_bytes(left);
    let c = Natural::from_be_bytes(right);

    assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));

    let bits = usize::from(data.first().copied().unwrap_or(0));
    assert_eq!((a.clone() << bits) >> bits, a);
    assert!((a.clone() ^ &a).is_zero());
    assert_eq!(a.clone() & &a, a);
    assert_eq!(a.clone() | &a, a);

    let hex = a.to_hexstring();
    assert_eq!(Natural::from_str_radix(&hex, 16).unwrap(), a);

    let mut padded = a.clone();
    padded.pad_block(8);
    assert_eq!(padded.payload() % 8, 0);
    if padded.payload() != a.payload() {
        padded.unpad_block().unwrap();
        assert_eq!(padded, a);
    }
});
