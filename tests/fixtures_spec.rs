use bmod_reader::bmod::format::pairing::KeyShape;
use bmod_reader::{
    decode_path, AvailabilityIndex, Bible, BmodError, Commentary, CrossReferenceEdge, CrossReferences,
    DecodeOptions, Dictionary, DictionaryRecord, Interlinear, Lexicon, ModuleCatalog, ModuleCode,
    ModuleFormat, ModuleKind, ModuleReader, PositionalLayout, Record, RecordSink, SinkError, StrongsId,
    Testament, TextRecord, Transliterations,
};
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures");
    p.push(name);
    p
}

fn decode<T: ModuleFormat>(name: &str) -> Vec<Record> {
    let reader = ModuleReader::<T>::open(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to open {}: {}", name, e));
    reader.iter_records().collect()
}

fn text(key: u32, body: &str, module: &str) -> Record {
    Record::Text(TextRecord {
        key,
        text: body.to_string(),
        module: ModuleCode::new(module),
    })
}

fn entry(topic: &str, definition: &str) -> Record {
    Record::Dictionary(DictionaryRecord {
        topic: topic.to_string(),
        definition: definition.to_string(),
        module: ModuleCode::new("EASTON"),
    })
}

fn strongs_ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| match record {
            Record::Lexicon(r) => r.strongs_id.to_string(),
            Record::Transliteration(r) => r.strongs_id.to_string(),
            other => panic!("unexpected record {:?}", other),
        })
        .collect()
}

/// Accepts `limit` records, then refuses everything.
struct FailingSink {
    accepted: usize,
    limit: usize,
}

impl RecordSink for FailingSink {
    fn accept(&mut self, _record: Record) -> Result<(), SinkError> {
        if self.accepted == self.limit {
            return Err(SinkError::new("storage full"));
        }
        self.accepted += 1;
        Ok(())
    }
}

#[test]
fn commentary_fixture_skips_bad_entries() {
    let records = decode::<Commentary>("MHC.ct4");
    assert_eq!(
        records,
        vec![
            text(1, "Commentary on Gen 1:1", "MHC"),
            text(2, "In the beginning", "MHC"),
            text(4, "text with \u{FFFD} undefined", "MHC"),
        ]
    );
}

#[test]
fn decoding_twice_yields_identical_records() {
    let reader = ModuleReader::<Commentary>::open(fixture_path("MHC.ct4")).expect("open commentary");
    let first: Vec<Record> = reader.iter_records().collect();
    let second: Vec<Record> = reader.iter_records().collect();
    assert_eq!(first, second);
    assert_eq!(reader.code.as_str(), "MHC");
    assert_eq!(reader.kind, ModuleKind::Commentary);
}

#[test]
fn dictionary_fixture_recovers_misaligned_pairs() {
    let records = decode::<Dictionary>("Easton.dt4");
    assert_eq!(
        records,
        vec![
            entry("Aaron", "Brother of Moses"),
            entry("Abaddon", "Destruction"),
            entry("Abiathar", "Father of plenty"),
            entry("Abib", "Ear of corn"),
        ]
    );
}

#[test]
fn dictionary_key_shape_is_configurable() {
    let options: DecodeOptions =
        serde_json::from_str(r#"{ "key_shape": { "max_chars": 5 } }"#).expect("parse options");
    assert_eq!(options.key_shape, KeyShape { max_chars: 5 });
    assert_eq!(options.layout, PositionalLayout::default());

    let reader = ModuleReader::<Dictionary>::open(fixture_path("Easton.dt4"))
        .and_then(|r| r.with_options(options))
        .expect("open dictionary");
    let topics: Vec<String> = reader
        .iter_records()
        .map(|record| match record {
            Record::Dictionary(r) => r.topic,
            other => panic!("unexpected record {:?}", other),
        })
        .collect();
    assert_eq!(topics, vec!["Aaron", "Abib"]);
}

#[test]
fn lexicon_fixtures_take_testament_from_extension() {
    let hebrew = decode::<Lexicon>("StrHeb.hx4");
    assert_eq!(strongs_ids(&hebrew), vec!["H1", "H7225"]);
    match &hebrew[0] {
        Record::Lexicon(r) => assert_eq!(r.definition, "Father\nof"),
        other => panic!("unexpected record {:?}", other),
    }

    let greek = decode::<Lexicon>("StrGrk.gx4");
    assert_eq!(strongs_ids(&greek), vec!["G3056"]);
}

#[test]
fn bible_fixture_numbers_verses_by_position() {
    let verses: Vec<(u32, String)> = decode::<Bible>("KJV.bt4")
        .into_iter()
        .map(|record| match record {
            Record::Verse(v) => (v.verse_id, v.text),
            other => panic!("unexpected record {:?}", other),
        })
        .collect();
    assert_eq!(
        verses,
        vec![
            (1, "In the beginning God created the heaven and the earth.".to_string()),
            (2, "And the earth was without form".to_string()),
            (4, "And God said".to_string()),
        ]
    );
}

#[test]
fn cross_reference_fixture_expands_ranges() {
    let edges: Vec<CrossReferenceEdge> = decode::<CrossReferences>("bcdxrefs.xr4")
        .into_iter()
        .map(|record| match record {
            Record::CrossReference(edge) => edge,
            other => panic!("unexpected record {:?}", other),
        })
        .collect();
    let expected: Vec<CrossReferenceEdge> = [
        (1, 0x36C0),
        (1, 0x3825),
        (1, 0x3826),
        (1, 0x3827),
        (0x64, 0x3BEA),
        (0x64, 0x3BEB),
        (0x64, 0x10),
        (0x65, 0xA),
    ]
    .into_iter()
    .map(|(from, to)| CrossReferenceEdge { from, to })
    .collect();
    assert_eq!(edges, expected);
}

#[test]
fn interlinear_fixture_aligns_each_verse() {
    let verses: Vec<(u32, String)> = decode::<Interlinear>("kjv.itl")
        .into_iter()
        .map(|record| match record {
            Record::Interlinear(v) => (
                v.verse_id,
                bmod_reader::bmod::inline::interlinear::format_pipe(&v.tokens),
            ),
            other => panic!("unexpected record {:?}", other),
        })
        .collect();
    assert_eq!(
        verses,
        vec![
            (1, "In|H0 the|H0 beginning|H7225 God|H430".to_string()),
            (2, "said|H559 [?]|H3808".to_string()),
            (43001, "In|G0 the|G0 beginning|G746 was|G2258".to_string()),
            (43002, "The|G0 same|G0 was|G0".to_string()),
        ]
    );
}

#[test]
fn transliteration_fixture_honours_layout() {
    let layout = PositionalLayout::contiguous(3, &[(Testament::Hebrew, 3), (Testament::Greek, 2)]);
    let reader = ModuleReader::<Transliterations>::open(fixture_path("Strongs.sd2"))
        .and_then(|r| r.with_layout(layout))
        .expect("open transliterations");
    let records: Vec<Record> = reader.iter_records().collect();
    assert_eq!(strongs_ids(&records), vec!["H1", "H2", "G1"]);
    match &records[1] {
        Record::Transliteration(r) => {
            assert_eq!(r.strongs_id, StrongsId::new(Testament::Hebrew, 2));
            assert_eq!(r.text, "'Abagtha'");
        }
        other => panic!("unexpected record {:?}", other),
    }

    // The default Strong's layout reads the same short table as Hebrew only.
    assert_eq!(strongs_ids(&decode::<Transliterations>("Strongs.sd2")), vec!["H1", "H2", "H4"]);
}

#[test]
fn invalid_layout_is_rejected_before_decoding() {
    let result = ModuleReader::<Transliterations>::open(fixture_path("Strongs.sd2"))
        .and_then(|r| r.with_layout(PositionalLayout::contiguous(0, &[(Testament::Hebrew, 1)])));
    assert!(matches!(result, Err(BmodError::InvalidLayout(_))));
}

#[test]
fn overflowing_layout_from_config_is_rejected() {
    let options: DecodeOptions = serde_json::from_value(serde_json::json!({
        "layout": {
            "stride": usize::MAX / 2,
            "groups": [{ "prefix": "Hebrew", "base_offset": 3, "count": 4 }]
        }
    }))
    .expect("parse options");
    let result = ModuleReader::<Transliterations>::open(fixture_path("Strongs.sd2"))
        .and_then(|r| r.with_options(options));
    assert!(matches!(result, Err(BmodError::InvalidLayout(_))));
}

#[test]
fn readers_reject_foreign_extensions() {
    let result = ModuleReader::<Commentary>::open(fixture_path("Easton.dt4"));
    assert!(matches!(result, Err(BmodError::UnsupportedModule(_))));

    let mut sink: Vec<Record> = Vec::new();
    let result = decode_path(fixture_path("README.txt"), &DecodeOptions::default(), &mut sink);
    assert!(matches!(result, Err(BmodError::UnsupportedModule(_))));
    assert!(sink.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let result = ModuleReader::<Bible>::open(fixture_path("Missing.bt4"));
    assert!(matches!(result, Err(BmodError::Io(_))));
}

#[test]
fn decode_path_dispatches_on_extension() {
    let mut sink: Vec<Record> = Vec::new();
    let count = decode_path(fixture_path("StrGrk.gx4"), &DecodeOptions::default(), &mut sink)
        .expect("decode lexicon");
    assert_eq!(count, 1);
    assert_eq!(
        serde_json::to_value(&sink[0]).expect("serialize record"),
        serde_json::json!({ "type": "lexicon", "strongs_id": "G3056", "definition": "word" })
    );
}

#[test]
fn sink_failure_stops_decoding() {
    let reader = ModuleReader::<Commentary>::open(fixture_path("MHC.ct4")).expect("open commentary");
    let mut sink = FailingSink { accepted: 0, limit: 1 };
    let result = reader.decode_into(&mut sink);
    match result {
        Err(BmodError::Sink(e)) => assert_eq!(e.message, "storage full"),
        other => panic!("expected sink error, got {:?}", other),
    }
    assert_eq!(sink.accepted, 1);
}

#[test]
fn in_memory_buffers_decode_like_files() {
    let reader = ModuleReader::<Commentary>::from_bytes(
        ModuleCode::new("mhc"),
        ModuleKind::Commentary,
        b"1\0from memory\0".to_vec(),
    )
    .expect("wrap buffer");
    let records: Vec<Record> = reader.iter_records().collect();
    assert_eq!(records, vec![text(1, "from memory", "MHC")]);
}

#[test]
fn in_memory_buffers_must_match_format() {
    let result = ModuleReader::<Lexicon>::from_bytes(
        ModuleCode::new("kjv"),
        ModuleKind::Bible,
        b"In the beginning\0".to_vec(),
    );
    assert!(matches!(result, Err(BmodError::UnsupportedModule(_))));

    let reader = ModuleReader::<Lexicon>::from_bytes(
        ModuleCode::new("strgrk"),
        ModuleKind::GreekLexicon,
        b"3056\0word\0".to_vec(),
    )
    .expect("wrap lexicon");
    let records: Vec<Record> = reader.iter_records().collect();
    assert_eq!(strongs_ids(&records), vec!["G3056"]);
}

#[test]
fn dictionary_iterator_can_be_forked() {
    let reader = ModuleReader::<Dictionary>::open(fixture_path("Easton.dt4")).expect("open dictionary");
    let mut records = reader.iter_records();
    records.next();
    let forked = records.clone();
    assert_eq!(forked.collect::<Vec<_>>(), records.collect::<Vec<_>>());
}

#[test]
fn catalog_lists_known_modules_in_path_order() {
    let catalog = ModuleCatalog::scan(fixture_path("")).expect("scan fixtures");
    let codes: Vec<&str> = catalog.entries().iter().map(|e| e.code.as_str()).collect();
    assert_eq!(
        codes,
        vec!["ACC", "EASTON", "KJV", "MHC", "STRGRK", "STRHEB", "STRONGS", "BCDXREFS", "KJV"]
    );
    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog.by_kind(ModuleKind::Commentary).count(), 2);
    assert_eq!(catalog.by_kind(ModuleKind::GreekLexicon).count(), 1);
}

#[test]
fn catalog_decodes_every_module() {
    let catalog = ModuleCatalog::scan(fixture_path("")).expect("scan fixtures");
    let mut records: Vec<Record> = Vec::new();
    let count = catalog
        .decode_all(&DecodeOptions::default(), &mut records)
        .expect("decode catalog");
    assert_eq!(count, records.len());
    assert_eq!(count, 31);
}

#[test]
fn availability_index_joins_commentary_codes() {
    let catalog = ModuleCatalog::scan(fixture_path("")).expect("scan fixtures");
    let mut index = AvailabilityIndex::new();
    catalog
        .decode_all(&DecodeOptions::default(), &mut index)
        .expect("decode catalog");

    assert_eq!(index.joined(1).as_deref(), Some("ACC,MHC"));
    assert_eq!(index.joined(0x1F).as_deref(), Some("ACC"));
    assert_eq!(index.joined(3), None);
    assert_eq!(index.verse_count(), 4);
    let codes: Vec<&str> = index.modules_for(2).into_iter().map(ModuleCode::as_str).collect();
    assert_eq!(codes, vec!["MHC"]);
}

#[test]
fn catalog_ignores_directories_and_unknown_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("Notes.ct4"), b"A\0note\0").expect("write module");
    fs::write(dir.path().join("notes.txt"), b"not a module").expect("write text file");
    fs::create_dir(dir.path().join("nested.ct4")).expect("create subdir");

    let catalog = ModuleCatalog::scan(dir.path()).expect("scan temp dir");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.entries()[0].kind, ModuleKind::Commentary);

    let mut records: Vec<Record> = Vec::new();
    catalog
        .decode_all(&DecodeOptions::default(), &mut records)
        .expect("decode temp catalog");
    assert_eq!(records, vec![text(0xA, "note", "NOTES")]);
}

#[test]
fn empty_directory_yields_empty_catalog() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let catalog = ModuleCatalog::scan(dir.path()).expect("scan temp dir");
    assert!(catalog.is_empty());
}

#[test]
fn readers_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModuleReader<Commentary>>();
    assert_send_sync::<ModuleReader<Transliterations>>();
}
