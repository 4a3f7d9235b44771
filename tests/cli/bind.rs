use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, commented, paragraph, stderr, stdout_json};

fn write_fixture(test: &CliTest) -> Result<()> {
    test.write_docx(
        "Informe_Ruido.docx",
        &format!(
            "{}{}{}",
            commented(0, "Cliente: {nombre_cliente}"),
            paragraph("{introduccion} {laeq} dBA"),
            paragraph("Pico: {nivel_pico}")
        ),
        &[(0, "Razón social")],
    )?;
    test.write_file(
        "records.json",
        r#"{ "OIT-2024-001": { "clientName": "Minera Andina S.A.", "oitNumber": 1204, "samplingDate": null } }"#,
    )?;
    test.write_file(
        "narratives.json",
        r#"{
          "RUIDO": {
            "intro": "Se presentan los resultados del monitoreo de ruido.",
            "methodology": "Sonómetro clase 1.",
            "results": "Los niveles cumplen el estándar."
          }
        }"#,
    )?;
    test.write_file("lab.json", r#"{ "LAeqT": 62.4 }"#)?;
    Ok(())
}

#[test]
fn test_bind_resolves_all_sources() -> Result<()> {
    let test = CliTest::new()?;
    write_fixture(&test)?;

    let output = test
        .command()
        .args([
            "bind",
            "Informe_Ruido.docx",
            "--record-id",
            "OIT-2024-001",
            "--records",
            "records.json",
            "--narratives",
            "narratives.json",
            "--lab-results",
            "lab.json",
        ])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let binding = stdout_json(&output)?;
    assert_eq!(binding["templateType"], "RUIDO");
    assert_eq!(binding["templatePattern"], "RUIDO");
    assert_eq!(
        binding["values"],
        json!({
            "nombre_cliente": { "value": "Minera Andina S.A." },
            "numero_oit": { "value": "1204" },
            "fecha_medicion": { "value": "" },
            "horario": { "value": "" },
            "introduccion": { "value": "Se presentan los resultados del monitoreo de ruido." },
            "metodologia": { "value": "Sonómetro clase 1." },
            "resultados": { "value": "Los niveles cumplen el estándar." },
            "laeq": { "value": "62.4" },
            "zona": { "value": "Zona residencial" },
            "norma_aplicable": { "value": "D.S. N° 085-2003-PCM" },
            "nivel_pico": "unmapped"
        })
    );
    assert!(stderr(&output).contains("1 variable(s) not declared for RUIDO: nivel_pico"));

    Ok(())
}

#[test]
fn test_bind_missing_narrative_fails_document() -> Result<()> {
    let test = CliTest::new()?;
    write_fixture(&test)?;
    test.write_file("narratives.json", r#"{ "RUIDO": { "intro": "Texto." } }"#)?;

    let output = test
        .command()
        .args(["bind", "Informe_Ruido.docx", "--narratives", "narratives.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no partial binding is printed");
    let stderr = stderr(&output);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("methodology"), "got: {}", stderr);

    Ok(())
}

#[test]
fn test_bind_unknown_template() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx("VIBRACIONES.docx", &paragraph("{velocidad}"), &[])?;

    let output = test.command().args(["bind", "VIBRACIONES.docx"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no template configuration matches \"VIBRACIONES\""));

    Ok(())
}

#[test]
fn test_bind_template_type_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_docx(
        "plantilla.docx",
        &paragraph("{categoria_eca} {ph} {oxigeno_disuelto}"),
        &[],
    )?;
    test.write_file(
        "narratives.json",
        r#"{ "calidad de agua": { "methodology": "M", "conclusions": "C" } }"#,
    )?;

    let output = test
        .command()
        .args([
            "bind",
            "plantilla.docx",
            "--template-type",
            "CALIDAD DE AGUA",
            "--narratives",
            "narratives.json",
        ])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let binding = stdout_json(&output)?;
    assert_eq!(binding["values"]["categoria_eca"], json!({ "value": "Categoría 3" }));
    assert_eq!(binding["values"]["ph"], json!({ "value": "N/A" }));
    assert_eq!(binding["values"]["oxigeno_disuelto"], json!({ "value": "<LD" }));
    assert_eq!(binding["values"]["metodologia"], json!({ "value": "M" }));

    Ok(())
}
