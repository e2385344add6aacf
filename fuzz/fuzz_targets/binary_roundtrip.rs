#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lexid_core::{Ulid, TIMESTAMP_MAX_MS};

#[derive(Arbitrary, Debug)]
struct Input {
    timestamp_ms: u64,
    randomness: [u8; 10],
    other: [u8; 16],
}

fuzz_target!(|input: Input| {
    let id = Ulid::from_parts(input.timestamp_ms, input.randomness);
    assert_eq!(id.timestamp_ms(), input.timestamp_ms & TIMESTAMP_MAX_MS);
    assert_eq!(id.randomness(), input.randomness);

    let text = id.to_string();
    assert_eq!(Ulid::parse(&text).unwrap(), id);
    assert_eq!(Ulid::try_from_slice(&id.to_bytes()).unwrap(), id);
    assert_eq!(Ulid::from_guid_bytes(id.to_guid_bytes()), id);

    let other = Ulid::from_bytes(input.other);
    assert_eq!(id.cmp(&other), text.cmp(&other.to_string()));
});
