use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, commented, paragraph, stderr, stdout};

#[test]
fn test_check_passes_for_covered_template() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx(
        "RUIDO.docx",
        &commented(0, "Zona {zona}, norma {norma_aplicable}"),
        &[(0, "Zona y norma")],
    )?;

    let output = test.command().arg("check").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_snapshot!(stdout(&output), @"✓ Checked 1 template - no issues found");

    Ok(())
}

#[test]
fn test_check_reports_unmapped_variable() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx(
        "RUIDO.docx",
        &format!(
            "{}{}",
            commented(3, "Nivel: {laeq}"),
            paragraph("Pico: {nivel_pico}")
        ),
        &[(3, "Niveles medidos")],
    )?;

    let output = test.command().arg("check").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stdout(&output), @r#"
    error: "nivel_pico"  unmapped-variable
      --> ./RUIDO.docx
       = note: not declared for RUIDO (comment: "Niveles medidos")

    ✘ 1 problems (1 error, 0 warnings)
    "#);

    Ok(())
}

#[test]
fn test_check_unknown_template_is_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx("VIBRACIONES.docx", &paragraph("{velocidad}"), &[])?;

    let output = test
        .command()
        .args(["check", "--rule", "unknown-template"])
        .output()?;

    assert!(output.status.success(), "warnings do not fail the check");
    let stdout = stdout(&output);
    assert!(stdout.contains("warning: \"VIBRACIONES\"  unknown-template"));
    assert!(stdout.contains("1 variable(s) have no data source"));

    Ok(())
}

#[test]
fn test_check_uncommented_rule() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx("RUIDO.docx", &paragraph("{zona}"), &[])?;

    let output = test
        .command()
        .args(["check", "--rule", "uncommented"])
        .output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("warning: \"zona\"  uncommented-variable"));

    Ok(())
}

#[test]
fn test_check_reports_corrupt_document() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("RUIDO.docx", "not a zip archive")?;

    let output = test.command().arg("check").output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("archive-error"));
    assert!(stdout.contains("--> ./RUIDO.docx"));

    Ok(())
}

#[test]
fn test_check_uses_configured_templates() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".docvarsrc.json",
        r#"{
          "templates": [
            {
              "templatePattern": "VIBRACIONES",
              "variables": {
                "velocidad": { "source": "external-result", "resultKey": "PPV" }
              }
            }
          ]
        }"#,
    )?;
    test.write_docx(
        "VIBRACIONES.docx",
        &commented(0, "{velocidad}"),
        &[(0, "Velocidad pico de partícula")],
    )?;

    let output = test.command().arg("check").output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));

    Ok(())
}

#[test]
fn test_check_invalid_config_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".docvarsrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.command().arg("check").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}
