#![no_main]

use libfuzzer_sys::fuzz_target;

use electoral_ledger::LedgerSnapshot;
use electoral_types::StateResult;

// Decoding and restoring untrusted snapshot bytes must fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let _ = bincode::deserialize::<StateResult>(data);

    let Ok(snapshot) = LedgerSnapshot::from_bytes(data) else {
        return;
    };
    let sealed = snapshot.hash;
    if let Ok(ledger) = snapshot.restore() {
        // Anything that restores must re-capture to the same sealed snapshot.
        let again = LedgerSnapshot::capture(&ledger);
        assert!(again.verify());
        assert_eq!(again.hash, sealed);
    }
});
