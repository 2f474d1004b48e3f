//! Interactive numbered menu
//!
//! A line-oriented loop over any `BufRead`/`Write` pair. Errors from an
//! action are printed and the menu is shown again; end of input exits.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::Settings;
use crate::display::ledger::{
    format_category_entries, format_entry_list, format_import_report, format_summary,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{format_amount, normalize_category, parse_amount, Ledger};

use super::session::Session;

const MENU: &str = "\
Personal Finance Tracker
1. Add transaction
2. View transactions
3. Update transaction
4. Delete transaction
5. Show summary
6. Import transactions
7. Open table viewer
8. Exit
";

/// Whether the loop can keep reading input
enum Step {
    Continue,
    Eof,
}

struct Prompt<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
    /// Set once reading the input stream has failed
    broken: bool,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    /// Print `label` and read one trimmed line, `None` at end of input
    fn ask(&mut self, label: &str) -> TallyResult<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim().to_string())),
            Err(e) => {
                self.broken = true;
                Err(e.into())
            }
        }
    }

    /// Ask until the answer parses as an amount
    fn ask_amount(&mut self, label: &str) -> TallyResult<Option<f64>> {
        loop {
            let Some(raw) = self.ask(label)? else {
                return Ok(None);
            };
            match parse_amount(&raw) {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) if e.is_retryable() => writeln!(self.out, "{}", e)?,
                Err(e) => return Err(e),
            }
        }
    }

    fn ask_index(&mut self, label: &str) -> TallyResult<Option<usize>> {
        let Some(raw) = self.ask(label)? else {
            return Ok(None);
        };
        raw.parse::<usize>()
            .map(Some)
            .map_err(|_| TallyError::parse("input", format!("'{}' is not a valid index", raw)))
    }
}

/// Run the menu until the user exits or input ends
///
/// `launch_viewer` is called for option 7 with the current ledger.
pub fn run_menu<R, W, F>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
    mut launch_viewer: F,
) -> TallyResult<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Ledger, &Settings) -> TallyResult<()>,
{
    let mut prompt = Prompt {
        input,
        out,
        broken: false,
    };

    loop {
        write!(prompt.out, "\n{}", MENU)?;
        let Some(choice) = prompt.ask("Choose an option: ")? else {
            break;
        };

        let result = match choice.as_str() {
            "1" => add(session, &mut prompt),
            "2" => view(session, &mut prompt),
            "3" => update(session, &mut prompt),
            "4" => delete(session, &mut prompt),
            "5" => {
                write!(prompt.out, "{}", format_summary(&session.ledger().summary()))?;
                Ok(Step::Continue)
            }
            "6" => import(session, &mut prompt),
            "7" => launch_viewer(session.ledger(), session.settings()).map(|_| Step::Continue),
            "8" => {
                writeln!(prompt.out, "Goodbye.")?;
                break;
            }
            other => {
                writeln!(prompt.out, "Invalid option: {}", other)?;
                Ok(Step::Continue)
            }
        };

        match result {
            Ok(Step::Continue) => {}
            Ok(Step::Eof) => break,
            // Errors from the actions themselves are reported; only losing
            // the input stream ends the session
            Err(e) if prompt.broken => return Err(e),
            Err(e) => writeln!(prompt.out, "Error: {}", e)?,
        }
    }

    Ok(())
}

fn add<R: BufRead, W: Write>(
    session: &mut Session,
    prompt: &mut Prompt<'_, R, W>,
) -> TallyResult<Step> {
    let Some(category) = prompt.ask("Category (e.g. salary, food): ")? else {
        return Ok(Step::Eof);
    };
    let Some(amount) = prompt.ask_amount("Amount (negative for expenses): ")? else {
        return Ok(Step::Eof);
    };
    let Some(date) = prompt.ask("Date (blank for today): ")? else {
        return Ok(Step::Eof);
    };

    let date = session.resolve_date(Some(date));
    session.service().add_entry(&category, amount, &date)?;
    writeln!(prompt.out, "Transaction added.")?;
    Ok(Step::Continue)
}

fn view<R: BufRead, W: Write>(
    session: &Session,
    prompt: &mut Prompt<'_, R, W>,
) -> TallyResult<Step> {
    write!(prompt.out, "{}", format_entry_list(&session.ledger().list_all()))?;
    Ok(Step::Continue)
}

/// Ask for a category and print its entries
fn choose_category<R: BufRead, W: Write>(
    session: &Session,
    prompt: &mut Prompt<'_, R, W>,
) -> TallyResult<Option<String>> {
    let Some(category) = prompt.ask("Category: ")? else {
        return Ok(None);
    };
    let key = normalize_category(&category);
    let entries = session
        .ledger()
        .entries(&key)
        .ok_or_else(|| TallyError::CategoryNotFound(key.clone()))?;
    write!(prompt.out, "{}", format_category_entries(&key, entries))?;
    Ok(Some(key))
}

fn update<R: BufRead, W: Write>(
    session: &mut Session,
    prompt: &mut Prompt<'_, R, W>,
) -> TallyResult<Step> {
    let Some(category) = choose_category(session, prompt)? else {
        return Ok(Step::Eof);
    };
    let Some(index) = prompt.ask_index("Index to update: ")? else {
        return Ok(Step::Eof);
    };
    let Some(new_category) = prompt.ask("New category (blank to keep): ")? else {
        return Ok(Step::Eof);
    };
    let new_category = if new_category.is_empty() {
        category.clone()
    } else {
        new_category
    };
    let Some(amount) = prompt.ask_amount("New amount: ")? else {
        return Ok(Step::Eof);
    };
    let Some(date) = prompt.ask("New date (blank for today): ")? else {
        return Ok(Step::Eof);
    };

    let date = session.resolve_date(Some(date));
    let previous = session
        .service()
        .update_entry(&category, index, &new_category, amount, &date)?;
    writeln!(
        prompt.out,
        "Updated {} -> {} on {}.",
        previous,
        format_amount(amount),
        date
    )?;
    Ok(Step::Continue)
}

fn delete<R: BufRead, W: Write>(
    session: &mut Session,
    prompt: &mut Prompt<'_, R, W>,
) -> TallyResult<Step> {
    let Some(category) = choose_category(session, prompt)? else {
        return Ok(Step::Eof);
    };
    let Some(index) = prompt.ask_index("Index to delete: ")? else {
        return Ok(Step::Eof);
    };
    let Some(confirm) = prompt.ask("Delete this transaction? (y/N): ")? else {
        return Ok(Step::Eof);
    };
    if !confirm.eq_ignore_ascii_case("y") {
        writeln!(prompt.out, "Cancelled.")?;
        return Ok(Step::Continue);
    }

    let removed = session.service().delete_entry(&category, index)?;
    writeln!(prompt.out, "Deleted {}.", removed)?;
    Ok(Step::Continue)
}

fn import<R: BufRead, W: Write>(
    session: &mut Session,
    prompt: &mut Prompt<'_, R, W>,
) -> TallyResult<Step> {
    let Some(path) = prompt.ask("File to import: ")? else {
        return Ok(Step::Eof);
    };
    let report = session.service().import_delimited(Path::new(&path))?;
    write!(prompt.out, "{}", format_import_report(&report, &path))?;
    Ok(Step::Continue)
}
