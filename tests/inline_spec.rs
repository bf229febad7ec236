use bmod_reader::bmod::inline::interlinear::{self, UNTRANSLATED};
use bmod_reader::bmod::inline::xref;
use bmod_reader::{CrossReferenceEdge, InterlinearToken, StrongsId, Testament};

fn tagged(pairs: &[(&str, &str)]) -> Vec<InterlinearToken> {
    pairs
        .iter()
        .map(|(word, tag)| InterlinearToken {
            word: word.to_string(),
            tag: tag.parse::<StrongsId>().expect("valid tag"),
        })
        .collect()
}

#[test]
fn angle_markers_tag_preceding_word() {
    let tokens = interlinear::align("In the beginning <H7225> God <H430>");
    assert_eq!(
        tokens,
        tagged(&[("In", "H0"), ("the", "H0"), ("beginning", "H7225"), ("God", "H430")])
    );
}

#[test]
fn brace_markers_attach_to_their_word() {
    let tokens = interlinear::align("said{H559} {H3808}");
    assert_eq!(tokens, tagged(&[("said", "H559"), (UNTRANSLATED, "H3808")]));
}

#[test]
fn morphology_markers_are_removed() {
    let tokens = interlinear::align("created{H1254}{(8804)} the heaven{H8064}");
    assert_eq!(
        tokens,
        tagged(&[("created", "H1254"), ("the", "H0"), ("heaven", "H8064")])
    );
}

#[test]
fn later_marker_overwrites_earlier() {
    let tokens = interlinear::align("word <H1> <H2>");
    assert_eq!(tokens, tagged(&[("word", "H2")]));

    let tokens = interlinear::align("word{H1}{H2}");
    assert_eq!(tokens, tagged(&[("word", "H2")]));

    let tokens = interlinear::align("word <H1><H2>");
    assert_eq!(tokens, tagged(&[("word", "H2")]));
}

#[test]
fn leading_angle_marker_becomes_placeholder() {
    let tokens = interlinear::align("<H853> the heaven");
    assert_eq!(tokens, tagged(&[(UNTRANSLATED, "H853"), ("the", "H0"), ("heaven", "H0")]));
}

#[test]
fn trailing_punctuation_after_marker_is_dropped() {
    let tokens = interlinear::align("earth{H776}.");
    assert_eq!(tokens, tagged(&[("earth", "H776")]));

    let tokens = interlinear::align("earth. <H776>");
    assert_eq!(tokens, tagged(&[("earth.", "H776")]));
}

#[test]
fn unicode_punctuation_after_marker_keeps_tag() {
    let tokens = interlinear::align("said{H559}\u{201D} God{H430}\u{2014}and");
    assert_eq!(tokens, tagged(&[("said", "H559"), ("God", "H430"), ("and", "H0")]));
}

#[test]
fn glued_markers_tag_each_fragment() {
    let tokens = interlinear::align("a{H1}b{H2}");
    assert_eq!(tokens, tagged(&[("a", "H1"), ("b", "H2")]));

    let tokens = interlinear::align("a<H1>,b<H2>.");
    assert_eq!(tokens, tagged(&[("a", "H1"), ("b", "H2")]));
}

#[test]
fn marker_text_never_leaks_into_words() {
    let tokens = interlinear::align("\u{201C}Let{H1961} there{H216}\u{2019}s light{H216}!\u{201D}");
    assert!(tokens.iter().all(|t| !t.word.contains(['{', '}', '<', '>'])));
    assert_eq!(tokens.last().map(|t| t.word.as_str()), Some("light"));
}

#[test]
fn greek_markers_select_greek_sentinel() {
    let tokens = interlinear::align("In the beginning{G746} was{G2258}");
    assert_eq!(
        tokens,
        tagged(&[("In", "G0"), ("the", "G0"), ("beginning", "G746"), ("was", "G2258")])
    );
    assert_eq!(interlinear::detect_testament("plain text"), Testament::Hebrew);
    assert_eq!(interlinear::marker_testament("plain text"), None);
    assert_eq!(interlinear::marker_testament("a{G1} b{H2}"), Some(Testament::Hebrew));
}

#[test]
fn explicit_testament_controls_sentinel() {
    let tokens = interlinear::align_for("The same was", Testament::Greek);
    assert!(tokens.iter().all(|t| t.tag == StrongsId::sentinel(Testament::Greek)));
    assert!(tokens.iter().all(|t| t.lexical_tag().is_none()));
}

#[test]
fn pipe_format_round_trips() {
    let tokens = interlinear::align("In the beginning <H7225> God <H430>");
    let stored = interlinear::format_pipe(&tokens);
    assert_eq!(stored, "In|H0 the|H0 beginning|H7225 God|H430");
    assert_eq!(interlinear::parse_pipe(&stored), tokens);
}

#[test]
fn pipe_parsing_keeps_multi_word_glosses() {
    let tokens = interlinear::parse_pipe("And the earth|H776 was|H1961 without form|H8414");
    assert_eq!(
        tokens,
        tagged(&[("And the earth", "H776"), ("was", "H1961"), ("without form", "H8414")])
    );
}

#[test]
fn pipe_parsing_drops_bad_tags_and_tags_trailing_words() {
    let tokens = interlinear::parse_pipe("word|X12 logos|G3056 trailing words");
    assert_eq!(tokens, tagged(&[("logos", "G3056"), ("trailing words", "G0")]));
}

#[test]
fn cross_reference_tokens_lie_between_markers() {
    let value = "\x0336C0\x03\x033825-3827\x03";
    let tokens: Vec<&str> = xref::reference_tokens(value).collect();
    assert_eq!(tokens, vec!["36C0", "3825-3827"]);

    let tokens: Vec<&str> = xref::reference_tokens("lead\x03 10 \x03tail").collect();
    assert_eq!(tokens, vec!["10"]);
}

#[test]
fn cross_reference_ranges_expand_to_edges() {
    let edges = xref::expand(100, "\x0336C0\x03\x033825-3827\x03");
    let expected: Vec<CrossReferenceEdge> = [0x36C0, 0x3825, 0x3826, 0x3827]
        .into_iter()
        .map(|to| CrossReferenceEdge { from: 100, to })
        .collect();
    assert_eq!(edges, expected);
}

#[test]
fn unresolvable_cross_reference_tokens_are_skipped() {
    let targets = xref::expand_targets("\x03XYZ\x03\x033-1\x03\x0310\x03\x03\x03");
    assert_eq!(targets, vec![0x10]);
    assert!(xref::expand_targets("no markers at all").is_empty());
}
