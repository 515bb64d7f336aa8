use std::{fs, process::exit};

use clap::Parser;
use color_print::{cformat, cprintln};

use y64asm::assemble;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file (.ys)
    input: String,

    /// Output file (defaults to the input with `.bin`)
    #[clap(short, long)]
    output: Option<String>,

    /// Dump the listing to the screen
    #[clap(short, long)]
    dump: bool,
}

/// Output path: as given, or the input with its `.ys` suffix replaced by
/// `.bin`. `None` when the input is not a `.ys` file at all.
fn out_path(input: &str, output: Option<String>) -> Option<String> {
    let stem = input.strip_suffix(".ys")?;
    Some(output.unwrap_or_else(|| format!("{}.bin", stem)))
}

fn main() {
    let args = Args::parse();

    let Some(out_path) = out_path(&args.input, args.output) else {
        cprintln!("<red,bold>error</>: input must be a `.ys` file: {}", args.input);
        exit(2);
    };

    let source = fs::read_to_string(&args.input)
        .expect(&cformat!("<red,bold>Cannot open input file</>: {}", args.input));

    let program = match assemble(&source) {
        Ok(program) => program,
        Err(e) => {
            e.print_diag(&args.input, &source);
            exit(1);
        }
    };

    let mut out = fs::File::create(&out_path)
        .expect(&cformat!("<red,bold>Cannot create output file</>: {}", out_path));
    program
        .emit(&mut out)
        .expect(&cformat!("<red,bold>Failed to write</>: {}", out_path));

    if args.dump {
        for record in program.records() {
            println!("{}", record.cformat());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_the_input_stem() {
        assert_eq!(out_path("prog.ys", None), Some("prog.bin".to_string()));
        assert_eq!(
            out_path("dir/sum.ys", None),
            Some("dir/sum.bin".to_string())
        );
    }

    #[test]
    fn explicit_output_wins() {
        assert_eq!(
            out_path("prog.ys", Some("other.bin".to_string())),
            Some("other.bin".to_string())
        );
    }

    #[test]
    fn non_ys_input_is_rejected() {
        assert_eq!(out_path("prog.s", None), None);
        assert_eq!(out_path("prog", Some("out.bin".to_string())), None);
    }
}
