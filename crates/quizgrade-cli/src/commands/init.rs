//! The `quizgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizgrade.toml
    if std::path::Path::new("quizgrade.toml").exists() {
        println!("quizgrade.toml already exists, skipping.");
    } else {
        std::fs::write("quizgrade.toml", SAMPLE_CONFIG)?;
        println!("Created quizgrade.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml with your questions");
    println!("  2. Run: quizgrade validate --bank banks/example.toml");
    println!("  3. Run: quizgrade serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizgrade configuration

host = "127.0.0.1"
port = 8787
bank = "banks/example.toml"
quiz_size = 12

# Empty list mirrors the request origin
allowed_origins = []
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A small example bank to get started"

[[questions]]
id = 1
type = "radio"
question = "What is the capital of France?"
choices = ["London", "Berlin", "Paris", "Madrid"]
correctIndex = 2

[[questions]]
id = 2
type = "checkbox"
question = "Which of the following are programming languages? (Select all that apply)"
choices = ["JavaScript", "HTML", "Python", "CSS"]
correctIndexes = [0, 2]

[[questions]]
id = 3
type = "text"
question = "What does CPU stand for?"
correctText = "Central Processing Unit"
"#;
