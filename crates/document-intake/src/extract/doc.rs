//! Legacy Word 97-2003 (.doc) text recovery
//!
//! The binary format is not parsed. Text is recovered as runs of printable
//! characters from both the 8-bit and UTF-16LE readings of the file, and
//! the reading that yields more text wins.

const MIN_RUN_CHARS: usize = 4;

pub(crate) fn extract_legacy_doc(bytes: &[u8]) -> String {
    let narrow = printable_runs(bytes.iter().map(|&b| u16::from(b)));
    let wide = printable_runs(
        bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
    );

    if wide.len() > narrow.len() {
        wide
    } else {
        narrow
    }
}

fn printable_runs(units: impl Iterator<Item = u16>) -> String {
    let mut out = String::new();
    let mut run = String::new();

    for unit in units {
        match char::from_u32(u32::from(unit)).filter(|c| is_text_char(*c)) {
            Some(c) => run.push(c),
            None => flush_run(&mut out, &mut run),
        }
    }
    flush_run(&mut out, &mut run);

    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.trim().chars().count() >= MIN_RUN_CHARS {
        out.push_str(&run.replace('\r', "\n"));
        out.push('\n');
    }
    run.clear();
}

/// ASCII printable plus Latin letters; anything wider is treated as binary
fn is_text_char(c: char) -> bool {
    matches!(c, '\r' | '\t' | ' '..='~') || (('\u{A0}'..='\u{24F}').contains(&c) && c != '\u{AD}')
}
