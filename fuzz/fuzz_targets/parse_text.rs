#![no_main]

use libfuzzer_sys::fuzz_target;

use lexid_core::Ulid;

fuzz_target!(|data: &[u8]| {
    let parsed = Ulid::from_utf8(data);

    if let Ok(text) = std::str::from_utf8(data) {
        assert_eq!(Ulid::try_parse(text), parsed.clone().ok());
    }

    if let Ok(id) = parsed {
        // Accepted input re-encodes to its uppercase form
        assert_eq!(id.encode().as_slice(), data.to_ascii_uppercase().as_slice());
    }
});
