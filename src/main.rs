use clap::Parser;

#[derive(Parser)]
#[command(name = "diff-parser")]
#[command(about = "Parse git-style unified diff files into structured blocks")]
struct Cli {
    /// Path to a diff file, or inline diff text starting with "diff --git"
    source: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let diff = diff_parser::parse(&cli.source)?;
    println!("{}", diff_parser::format_diff(&diff));

    Ok(())
}
