//! End-to-end encoding scenarios with known trees

use test_helpers::*;

use adaptive_huffman::{CodeStatistics, Encoder, EncoderConfig};
use test_case::test_case;

#[test_case("a", &[('a', "1")], "0" ; "single symbol")]
#[test_case("aa", &[('a', "1")], "0" ; "repeated single symbol")]
#[test_case("ab", &[('a', "1"), ('b', "01")], "00" ; "two symbols")]
#[test_case("abb", &[('b', "1"), ('a', "01")], "00" ; "second symbol overtakes")]
#[test_case("abc", &[('a', "0"), ('b', "11"), ('c', "101")], "100" ; "three symbols")]
#[test_case("aabbbcccc", &[('a', "101"), ('b', "11"), ('c', "0")], "100" ; "grouped runs")]
#[test_case(
    "mississippi",
    &[('i', "11"), ('m', "1001"), ('p', "101"), ('s', "0")],
    "1000" ;
    "mississippi"
)]
#[test_case(
    "abracadabra",
    &[('a', "0"), ('b', "111"), ('c', "101"), ('d', "1001"), ('r', "110")],
    "1000" ;
    "abracadabra"
)]
fn final_codes(text: &str, expected: &[(char, &str)], sentinel_code: &str) {
    let (encoder, _) = encode_strict(text);
    let table = encoder.code_table();

    assert_eq!(table.len(), expected.len());
    for &(symbol, code) in expected {
        let actual = table.code(symbol).map(|c| c.to_string());
        assert_eq!(actual.as_deref(), Some(code), "code for {symbol:?}");
    }

    let tree = encoder.tree();
    let nyt = tree.code_of(tree.sentinel()).expect("sentinel has a code");
    assert_eq!(nyt.to_string(), sentinel_code);
}

#[test_case("aa", &[0, 0] ; "no exchange for a lone symbol")]
#[test_case("abb", &[0, 0, 1] ; "one exchange when b overtakes")]
#[test_case("abracadabra", &[0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0] ; "abracadabra")]
fn exchanges_per_step(text: &str, expected: &[usize]) {
    let (_, reports) = encode_strict(text);
    let exchanges: Vec<usize> = reports.iter().map(|report| report.exchanges).collect();
    assert_eq!(exchanges, expected);
}

#[test]
fn single_symbol_tree_shape() {
    let (encoder, reports) = encode_strict("a");
    let tree = encoder.tree();

    assert_eq!(tree.len(), 3);
    assert_eq!(order_weights(tree), vec![0, 1, 1]);
    assert!(reports[0].first_occurrence);
    assert!(reports[0].emitted.is_empty());
}

#[test]
fn two_symbol_order_sequence() {
    let (encoder, _) = encode_strict("ab");
    let tree = encoder.tree();
    let order = tree.order_sequence();

    // nyt, b, inner, a, root
    assert_eq!(order[0], tree.sentinel());
    assert_eq!(Some(order[1]), tree.leaf('b'));
    assert_eq!(Some(order[3]), tree.leaf('a'));
    assert_eq!(order[4], tree.root());
    assert_eq!(order_weights(tree), vec![0, 1, 1, 1, 2]);
}

#[test]
fn abracadabra_packs_and_decodes() {
    let text = "abracadabra";
    let (encoder, _) = encode_strict(text);
    let table = encoder.code_table();

    let leaf_order: String = table.iter().map(|entry| entry.symbol).collect();
    assert_eq!(leaf_order, "adcrb");

    let packed = encoder.pack(text.chars()).expect("all symbols are known");
    assert_eq!(packed.bit_len(), 24);
    assert_eq!(packed.as_bytes(), &[0x7C, 0xA9, 0x7C]);

    let decoded: String = decode_with_tree(encoder.tree(), packed.bits().iter().by_vals(), 11)
        .into_iter()
        .collect();
    assert_eq!(decoded, text);
}

#[test]
fn emitted_codes_replay_through_decoder() {
    for text in ["abracadabra", "mississippi", "abb", "the quick brown fox"] {
        let (_, reports) = encode_strict(text);
        let replayed: String = replay_decoder(&reports).into_iter().collect();
        assert_eq!(replayed, text);
    }
}

#[test]
fn empty_stream() {
    let (encoder, reports) = encode_strict("");
    let tree = encoder.tree();

    assert!(reports.is_empty());
    assert_eq!(tree.root(), tree.sentinel());
    assert!(encoder.code_table().is_empty());
    assert_eq!(encoder.statistics(), CodeStatistics::default());

    let packed = encoder.pack("".chars()).expect("empty stream packs");
    assert_eq!(packed.byte_len(), 0);
}

#[test]
fn statistics_for_grouped_runs() {
    let (encoder, _) = encode_strict("aabbbcccc");
    let stats = encoder.statistics();

    assert_eq!(stats.total, 9);
    assert_eq!(stats.symbols, 3);
    assert!((stats.average_code_length - 16.0 / 9.0).abs() < 1e-12);

    let expected_entropy: f64 = [2.0f64, 3.0, 4.0]
        .iter()
        .map(|count| {
            let p = count / 9.0;
            -p * p.log2()
        })
        .sum();
    assert!((stats.entropy - expected_entropy).abs() < 1e-12);
    assert!(stats.redundancy() >= 0.0);
}

#[test]
fn whitespace_and_unicode_symbols() {
    let text = "ä b\tä\nß ß";
    let (encoder, reports) = encode_strict(text);

    assert_eq!(encoder.tree().symbol_count(), 6);
    let replayed: String = replay_decoder(&reports).into_iter().collect();
    assert_eq!(replayed, text);
}

#[test]
fn verification_can_be_disabled() {
    let mut encoder = Encoder::new(EncoderConfig::default());
    encoder
        .encode_all("abracadabra".chars())
        .expect("encoding succeeds");
    assert!(encoder.tree().validate().is_ok());
}
