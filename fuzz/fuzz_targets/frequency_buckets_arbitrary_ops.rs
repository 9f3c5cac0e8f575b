#![no_main]

use boundcache::ds::{FrequencyBuckets, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on FrequencyBuckets
//
// The first byte picks the frequency cap; every following pair is an
// opcode and an operand. Handles of removed entries are kept around so
// stale ids get exercised too.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };

    let mut buckets: FrequencyBuckets<u8> = FrequencyBuckets::new(usize::from(cap % 16));
    let mut ids: Vec<SlotId> = Vec::new();

    for pair in ops.chunks_exact(2) {
        let (op, arg) = (pair[0] % 7, pair[1]);
        let pick = |ids: &Vec<SlotId>| ids.get(usize::from(arg) % ids.len().max(1)).copied();

        match op {
            0 => {
                ids.push(buckets.insert(arg));
            }
            1 => {
                if let Some(id) = pick(&ids) {
                    buckets.touch(id);
                }
            }
            2 => {
                if let Some(id) = pick(&ids) {
                    buckets.remove(id);
                }
            }
            3 => {
                let len = buckets.len();
                if let Some((_, freq)) = buckets.pop_lowest() {
                    assert!(freq <= buckets.max_frequency());
                    assert_eq!(buckets.len(), len - 1);
                }
            }
            4 => {
                let _ = buckets.peek_lowest();
            }
            5 => {
                if let Some(id) = pick(&ids) {
                    let _ = buckets.frequency(id);
                }
            }
            _ => {
                if arg == 0 {
                    buckets.clear();
                    ids.clear();
                }
            }
        }

        buckets.check_invariants().unwrap();
    }
});
