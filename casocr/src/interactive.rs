//! Interactive labeling session
//!
//! Each image is shown by name and the operator types its text. A typed
//! label is held back as the pending sample and only committed when the
//! next label arrives, so `x` can still discard it.
//!
//! - `q`: commit the pending sample and stop
//! - `x`: discard the pending sample and skip the current image
//! - anything else: commit the pending sample, then make this image pending;
//!   re-prompts until the text has exactly `glyph_count` characters

use crate::error::CliResult;
use casocr::Pix;
use casocr::recog::Trainer;
use std::io::{BufRead, Write};

const QUIT: &str = "q";
const UNDO: &str = "x";

/// Read one line without its terminator; `None` at end of input.
fn read_line(input: &mut impl BufRead) -> CliResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Commit a pending sample, reporting the running failure rate on rejection.
fn commit(
    trainer: &mut Trainer<'_>,
    pending: Option<(String, Pix)>,
    out: &mut impl Write,
) -> CliResult<()> {
    let Some((label, pix)) = pending else {
        return Ok(());
    };
    if let Err(e) = trainer.try_add_sample(&pix, &label) {
        writeln!(
            out,
            "previous sample {:?} rejected ({}); failure rate {}/{} ({:.1}%)",
            label,
            e,
            trainer.failed(),
            trainer.attempted(),
            100.0 * trainer.failure_rate()
        )?;
    }
    Ok(())
}

/// Run a session over `images` (display name, decoded image).
///
/// End of input behaves like `q`.
pub fn run<I>(
    trainer: &mut Trainer<'_>,
    images: I,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> CliResult<()>
where
    I: IntoIterator<Item = (String, Pix)>,
{
    let glyph_count = trainer.options().glyph_count;
    writeln!(out, "type the text of each captcha; '{QUIT}' to quit, '{UNDO}' to undo the previous one")?;

    let mut pending: Option<(String, Pix)> = None;
    for (name, pix) in images {
        write!(out, "{name}: ")?;
        out.flush()?;
        let Some(mut text) = read_line(input)? else {
            break;
        };

        match text.as_str() {
            QUIT => break,
            UNDO => {
                pending = None;
                continue;
            }
            _ => {}
        }

        commit(trainer, pending.take(), out)?;
        while text.chars().count() != glyph_count {
            write!(out, "need {glyph_count} characters, {name}: ")?;
            out.flush()?;
            match read_line(input)? {
                Some(t) => text = t,
                None => return Ok(()),
            }
        }
        pending = Some((text, pix));
    }

    commit(trainer, pending, out)
}
