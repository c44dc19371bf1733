use std::io;
use std::io::Write;

pub fn input(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?; // show the prompt before blocking on stdin

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompts once and falls back to `default` on an empty answer.
pub fn input_or(prompt: &str, default: &str) -> io::Result<String> {
    let value = input(prompt)?;
    if value.is_empty() {
        println!("No URL provided. Using default...");
        Ok(default.to_string())
    } else {
        Ok(value)
    }
}
