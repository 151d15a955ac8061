use anyhow::{Context, Result};
use receipt_processor::{breakdown, validate, PointsBreakdown, Receipt, ValidationError};
use std::env;
use std::fs;
use std::path::Path;

// Use library for validation + scoring; this binary never touches the store

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let (command, files) = match args.get(1).map(String::as_str) {
        Some(cmd @ ("score" | "check")) if args.len() > 2 => (cmd, &args[2..]),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    };

    let mut failures = 0;
    for file in files {
        match run_file(Path::new(file), command == "score") {
            Ok(true) => {}
            Ok(false) => failures += 1,
            Err(e) => {
                eprintln!("❌ {}: {:#}", file, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("\n{} of {} receipt(s) failed", failures, files.len());
        std::process::exit(1);
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  receipt-points score <receipt.json>...   validate and print points per rule");
    eprintln!("  receipt-points check <receipt.json>...   validate only");
}

/// Returns Ok(false) when the receipt is readable but invalid
fn run_file(path: &Path, with_points: bool) -> Result<bool> {
    let receipt = load_receipt(path)?;

    match evaluate(&receipt) {
        Err(errors) => {
            println!("❌ {}: invalid receipt", path.display());
            for error in errors {
                println!("   - {}", error);
            }
            Ok(false)
        }
        Ok(result) => {
            println!("✓ {}: valid", path.display());
            if with_points {
                for score in &result.scores {
                    println!("   {:<22} {:>6}", score.rule.name(), score.points);
                }
                println!("   {:<22} {:>6}", "total", result.total());
            }
            Ok(true)
        }
    }
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    serde_json::from_str(&content).context("Failed to parse receipt JSON")
}

fn evaluate(receipt: &Receipt) -> Result<PointsBreakdown, Vec<ValidationError>> {
    validate(receipt)?;
    Ok(breakdown(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let file_name = format!("receipt-points-{}-{}.json", std::process::id(), name);
        let path = env::temp_dir().join(file_name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_score_valid_file() {
        let path = write_temp(
            "valid",
            r#"{"retailer": "M&M Corner Market", "purchaseDate": "2022-03-20",
                "purchaseTime": "14:33", "total": "9.00",
                "items": [{"shortDescription": "Gatorade", "price": "2.25"},
                          {"shortDescription": "Gatorade", "price": "2.25"},
                          {"shortDescription": "Gatorade", "price": "2.25"},
                          {"shortDescription": "Gatorade", "price": "2.25"}]}"#,
        );

        let receipt = load_receipt(&path).unwrap();
        assert_eq!(evaluate(&receipt).unwrap().total(), 109);
        assert!(run_file(&path, true).unwrap());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_file() {
        let path = write_temp("invalid", r#"{"retailer": "Target", "items": []}"#);
        assert!(!run_file(&path, false).unwrap());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_unreadable_file() {
        assert!(run_file(Path::new("/nonexistent/receipt.json"), true).is_err());
    }
}
