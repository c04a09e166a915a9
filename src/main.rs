use clap::Parser;
use std::path::PathBuf;

use docx_model::Justification;

#[derive(Parser)]
#[command(name = "docx-model", about = "Inspect the structure of a DOCX file")]
struct Args {
    /// Input DOCX file
    input: PathBuf,
    /// Print per-run detail instead of one line per paragraph
    #[arg(short, long)]
    runs: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let doc = match docx_model::try_read_document(&args.input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "{} paragraphs, {} styles, {} footnotes, {} endnotes",
        doc.paragraphs.len(),
        doc.styles.len(),
        doc.footnotes.len(),
        doc.endnotes.len(),
    );

    for (i, para) in doc.paragraphs.iter().enumerate() {
        let mut flags = String::new();
        if para.justification != Justification::Left {
            flags.push_str(&format!(" {:?}", para.justification).to_lowercase());
        }
        if para.numbered {
            flags.push_str(&format!(" list(lvl {})", para.level));
        }
        if para.right_to_left {
            flags.push_str(" rtl");
        }
        let text: String = para.runs.iter().map(|r| r.text.as_str()).collect();
        println!("[{i}] {}{flags}: {text:?}", para.style_id);

        if args.runs {
            for run in &para.runs {
                let mut marks = String::new();
                for (on, mark) in [
                    (run.bold, 'b'),
                    (run.italic, 'i'),
                    (run.underline, 'u'),
                    (run.strike, 's'),
                ] {
                    if on {
                        marks.push(mark);
                    }
                }
                if run.note_id != 0 {
                    println!("    note ref {}", run.note_id);
                } else {
                    println!("    [{marks}] {:?}", run.text);
                }
            }
        }
    }
}
