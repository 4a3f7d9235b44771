use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, commented, paragraph, stderr, stdout, stdout_json};

fn write_templates(test: &CliTest) -> Result<()> {
    test.write_docx(
        "plantillas/RUIDO.docx",
        &format!(
            "{}{}",
            commented(0, "Cliente: {nombre_cliente}"),
            paragraph("Nivel: {laeq} dBA, pico {laeq}")
        ),
        &[(0, "Razón social del cliente")],
    )?;
    test.write_docx(
        "plantillas/Informe_Calidad_de_Aire.docx",
        &paragraph("PM10: {pm10}"),
        &[],
    )?;
    Ok(())
}

#[test]
fn test_analyze_reports_by_template_type() -> Result<()> {
    let test = CliTest::new()?;
    write_templates(&test)?;

    let output = test.command().args(["analyze", "plantillas"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report = stdout_json(&output)?;
    let keys: Vec<&String> = report.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["CALIDAD DE AIRE", "RUIDO"]);

    let ruido = &report["RUIDO"];
    assert_eq!(ruido["filename"], "RUIDO.docx");
    assert_eq!(ruido["totalVariables"], 3);
    assert_eq!(ruido["totalComments"], 1);
    assert_eq!(ruido["variables"], json!(["nombre_cliente", "laeq"]));
    assert_eq!(
        ruido["variableDescriptions"]["laeq"],
        json!({ "description": "Razón social del cliente", "commentId": "0" })
    );
    assert_eq!(ruido["allComments"], json!({ "0": "Razón social del cliente" }));

    let aire = &report["CALIDAD DE AIRE"];
    assert_eq!(
        aire["variableDescriptions"]["pm10"],
        json!({ "description": "No comment found", "commentId": null })
    );
    assert_eq!(aire["totalComments"], 0);

    Ok(())
}

#[test]
fn test_analyze_continues_after_corrupt_document() -> Result<()> {
    let test = CliTest::new()?;
    write_templates(&test)?;
    test.write_file("plantillas/VIBRACIONES.docx", "not a zip archive")?;

    let output = test.command().args(["analyze", "plantillas"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output)?;
    let error = report["VIBRACIONES"].as_str().unwrap();
    assert!(error.starts_with("ERROR: "), "got: {}", error);
    assert!(report["RUIDO"].is_object());
    assert!(stderr(&output).contains("1 document could not be read"));

    Ok(())
}

#[test]
fn test_analyze_same_type_gets_numbered_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx("a/RUIDO.docx", &paragraph("{zona}"), &[])?;
    test.write_docx("b/RUIDO_nocturno.docx", &paragraph("{horario}"), &[])?;

    let output = test.command().arg("analyze").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report = stdout_json(&output)?;
    assert_eq!(report["RUIDO"]["filename"], "RUIDO.docx");
    assert_eq!(report["RUIDO (2)"]["filename"], "RUIDO_nocturno.docx");

    Ok(())
}

#[test]
fn test_analyze_skips_lock_files_and_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx("RUIDO.docx", &paragraph("{zona}"), &[])?;
    test.write_file("~$RUIDO.docx", "lock")?;
    test.write_docx("borradores/AGUA.docx", &paragraph("{ph}"), &[])?;
    test.write_file(".docvarsrc.json", r#"{ "ignores": ["**/borradores/**"] }"#)?;

    let output = test.command().arg("analyze").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report = stdout_json(&output)?;
    let keys: Vec<&String> = report.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["RUIDO"]);

    Ok(())
}

#[test]
fn test_analyze_writes_output_file() -> Result<()> {
    let test = CliTest::new()?;
    write_templates(&test)?;

    let output = test
        .command()
        .args(["analyze", "plantillas", "--output", "report.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Wrote 2 template(s) to report.json"));
    assert!(stdout.contains("RUIDO"));
    assert!(stdout.contains("2 variable(s), 1 comment(s)"));

    let written: serde_json::Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(written["RUIDO"]["totalVariables"], 3);

    Ok(())
}

#[test]
fn test_analyze_output_is_deterministic() -> Result<()> {
    let test = CliTest::new()?;
    write_templates(&test)?;

    let first = test.command().args(["analyze", "plantillas"]).output()?;
    let second = test.command().args(["analyze", "plantillas"]).output()?;

    assert_eq!(stdout(&first), stdout(&second));

    Ok(())
}

#[test]
fn test_analyze_missing_path_warns() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx("RUIDO.docx", &paragraph("{zona}"), &[])?;

    let output = test
        .command()
        .args(["analyze", "RUIDO.docx", "missing"])
        .output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("1 path(s) could not be scanned"));
    assert!(stdout_json(&output)?["RUIDO"].is_object());

    Ok(())
}
