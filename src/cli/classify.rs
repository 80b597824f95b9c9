use std::path::PathBuf;

use bombo::classifier::classify;
use bombo::payment::detect_payment_method;

pub fn run(text: &str, mapping: Option<PathBuf>) -> anyhow::Result<()> {
    let loader = super::loader(mapping);
    let result = classify(text, loader.load()?);
    println!("Category: {}", result.category_name);
    println!("Merchant: {}", result.merchant);
    if let Some(method) = detect_payment_method(text) {
        println!("Method:   {}", method.key());
    }
    Ok(())
}
