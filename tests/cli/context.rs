use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, paragraph, stderr, stdout_json};

#[test]
fn test_context_windows_per_variable() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx(
        "RUIDO.docx",
        &format!(
            "{}{}",
            paragraph("Informe para {nombre_cliente} en la zona {zona}."),
            paragraph("Atentamente, {nombre_cliente}")
        ),
        &[],
    )?;

    let output = test.command().args(["context", "RUIDO.docx"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let meanings = stdout_json(&output)?;
    assert_eq!(
        meanings,
        json!({
            "nombre_cliente": {
                "occurrences": 2,
                "contexts": [
                    { "before": "Informe para", "after": "en la zona {zona}. Atentamente" },
                    { "before": "Informe para {nombre_cliente} en la zona {zona}. Atentamente,", "after": "" }
                ]
            },
            "zona": {
                "occurrences": 1,
                "contexts": [
                    { "before": "Informe para {nombre_cliente} en la zona", "after": ". Atentamente, {nombre_cliente" }
                ]
            }
        })
    );

    Ok(())
}

#[test]
fn test_context_keeps_three_examples() -> Result<()> {
    let test = CliTest::new()?;
    let body: String = (0..5)
        .map(|i| paragraph(&format!("Punto {} {{ubicacion}}", i)))
        .collect();
    test.write_docx("AIRE.docx", &body, &[])?;

    let output = test.command().args(["context", "AIRE.docx"]).output()?;

    let meanings = stdout_json(&output)?;
    assert_eq!(meanings["ubicacion"]["occurrences"], 5);
    assert_eq!(meanings["ubicacion"]["contexts"].as_array().unwrap().len(), 3);

    Ok(())
}

#[test]
fn test_context_missing_file_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["context", "missing.docx"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}
