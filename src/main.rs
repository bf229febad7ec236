use bmod_reader::{decode_path, AvailabilityIndex, DecodeOptions, ModuleCatalog, ModuleKind, Record};
use std::env;
use std::path::Path;

fn describe(record: &Record) -> String {
    match record {
        Record::Text(r) => format!("[{}] {:#x}: {}", r.module, r.key, preview(&r.text)),
        Record::Dictionary(r) => format!("[{}] {}: {}", r.module, r.topic, preview(&r.definition)),
        Record::Lexicon(r) => format!("{}: {}", r.strongs_id, preview(&r.definition)),
        Record::CrossReference(r) => format!("{} -> {}", r.from, r.to),
        Record::Transliteration(r) => format!("{}: {}", r.strongs_id, r.text),
        Record::Verse(r) => format!("{}: {}", r.verse_id, preview(&r.text)),
        Record::Interlinear(r) => {
            let words: Vec<String> = r.tokens.iter().map(|t| format!("{}|{}", t.word, t.tag)).collect();
            format!("{}: {}", r.verse_id, preview(&words.join(" ")))
        }
    }
}

fn preview(text: &str) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() > 60 {
        format!("{}...", flat.chars().take(60).collect::<String>())
    } else {
        flat
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <module-file-or-directory> [--limit <N>]", args[0]);
        std::process::exit(1);
    }

    let target = Path::new(&args[1]);
    let mut limit = 10usize;
    if let Some(limit_idx) = args.iter().position(|arg| arg == "--limit") {
        match args.get(limit_idx + 1).and_then(|s| s.parse().ok()) {
            Some(n) => limit = n,
            None => {
                eprintln!("ERROR: --limit flag requires a number.");
                std::process::exit(1);
            }
        }
    }

    let options = DecodeOptions::default();
    let mut records: Vec<Record> = Vec::new();

    let result = if target.is_dir() {
        ModuleCatalog::scan(target).and_then(|catalog| {
            println!("Modules in {}:", target.display());
            for entry in catalog.entries() {
                println!("  {} ({}) {}", entry.code, entry.kind, entry.path.display());
            }
            catalog.decode_all(&options, &mut records)
        })
    } else {
        println!("Reading module file: {}", target.display());
        if let Some(kind) = ModuleKind::from_path(target) {
            println!("  Kind: {}", kind);
        }
        decode_path(target, &options, &mut records)
    };

    match result {
        Ok(count) => {
            println!("{}", "=".repeat(60));
            println!("Decoded {} records.", count);

            let index = AvailabilityIndex::from_records(&records);
            if index.verse_count() > 0 {
                println!("  Verses with commentary: {}", index.verse_count());
            }

            println!("\nSample records (first {}):", limit);
            for (i, record) in records.iter().take(limit).enumerate() {
                println!("  {}. {}", i + 1, describe(record));
            }
            if records.len() > limit {
                println!("  ... and {} more", records.len() - limit);
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to decode {}", target.display());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
