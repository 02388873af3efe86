use std::cmp::Ordering;

// Natural ordering for amplicon labels, so "2" sorts before "10" and "10" before "10a".
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a_prefix, a_rest) = a.split_at(a.chars().take_while(|c| !c.is_ascii_digit()).count());
    let (b_prefix, b_rest) = b.split_at(b.chars().take_while(|c| !c.is_ascii_digit()).count());

    let (a_num, a_suffix) = a_rest.split_at(a_rest.chars().take_while(|c| c.is_ascii_digit()).count());
    let (b_num, b_suffix) = b_rest.split_at(b_rest.chars().take_while(|c| c.is_ascii_digit()).count());

    a_prefix
        .cmp(b_prefix)
        .then_with(|| {
            // Compare digit runs by magnitude without overflowing on long runs
            let a_num = a_num.trim_start_matches('0');
            let b_num = b_num.trim_start_matches('0');
            a_num.len().cmp(&b_num.len()).then_with(|| a_num.cmp(b_num))
        })
        .then_with(|| a_suffix.cmp(b_suffix))
        .then_with(|| a.cmp(b))
}
