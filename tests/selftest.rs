use pisplit::{compute_pi, first_mismatch, self_test};

#[test]
fn self_consistency_at_growing_sizes() {
    for digits in [10, 100, 1000] {
        let (ok, verdict) = self_test(digits).unwrap();
        assert!(ok, "digits={}: {}", digits, verdict);
        assert!(verdict.contains("match"));
    }
}

#[test]
fn corrupted_character_is_located_by_index() {
    let good = compute_pi(1000).unwrap();

    let mut corrupted = good.clone().into_bytes();
    let index = 837;
    corrupted[index] = if corrupted[index] == b'7' { b'8' } else { b'7' };
    let corrupted = String::from_utf8(corrupted).unwrap();

    assert_eq!(first_mismatch(&corrupted, &good), Some(index));
}

#[test]
fn length_difference_is_a_mismatch() {
    let good = compute_pi(20).unwrap();
    let short = &good[..good.len() - 1];
    assert_eq!(first_mismatch(short, &good), Some(good.len() - 1));
}
