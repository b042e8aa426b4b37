use htmlpath::HtmlPathError;
use std::env;
use std::fs;
use std::process;

/// A simple CLI to run an XPath expression against an HTML file.
fn main() -> Result<(), HtmlPathError> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Evaluate an XPath expression against an HTML document.");
        eprintln!();
        eprintln!("Usage: {} <path/to/page.html> <expression>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} page.html \"//div//a[@id]/@href\"", args[0]);
        eprintln!("  {} page.html \"count(//a)\"", args[0]);
        process::exit(1);
    }

    let html = fs::read_to_string(&args[1])?;
    for result in htmlpath::query(&html, &args[2])? {
        println!("{result}");
    }
    Ok(())
}
