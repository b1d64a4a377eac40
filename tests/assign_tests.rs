//! Assignment runs against an in-memory LIMS

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use clap::Parser as _;
    use rust_xlsxwriter::Workbook;
    use sparkquant::cli::Args;
    use sparkquant::error::SparkError;
    use sparkquant::lims::mock::MockLims;
    use sparkquant::lims::xml::parse_artifact;
    use sparkquant::operations::{AssignOperation, AssignSettings};

    const PID: &str = "24-100";
    const SPARK_FILE: &str = "Spark HighSens File";
    const CONC_UDF: &str = "QuantIt HS Concentration";
    const NM_UDF: &str = "QuantIt HS Concentration (nM)";

    enum Cell {
        Text(&'static str),
        Number(f64),
        Blank,
    }

    fn workbook(rows: &[[Cell; 3]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            let r = u32::try_from(r).unwrap();
            for (c, cell) in row.iter().enumerate() {
                let c = u16::try_from(c).unwrap();
                match *cell {
                    Cell::Text(text) => {
                        sheet.write_string(r, c, text).unwrap();
                    }
                    Cell::Number(number) => {
                        sheet.write_number(r, c, number).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn standard_sheet() -> Vec<u8> {
        workbook(&[
            [Cell::Text("Application: Tecan i-control"), Cell::Blank, Cell::Blank],
            [Cell::Blank, Cell::Blank, Cell::Blank],
            [Cell::Text("Well"), Cell::Text("Raw"), Cell::Text("Concentration")],
            [Cell::Text("A01"), Cell::Number(5120.0), Cell::Number(10.0)],
            [Cell::Text("B01"), Cell::Number(140.0), Cell::Text("<Min")],
        ])
    }

    fn process_xml() -> String {
        let mut maps = String::new();
        for (input, output) in [("2-1", "92-1"), ("2-2", "92-2")] {
            maps.push_str(&format!(
                r#"<input-output-map><input limsid="{input}"/><output limsid="{output}" output-type="ResultFile" output-generation-type="PerInput"/></input-output-map>"#
            ));
            maps.push_str(&format!(
                r#"<input-output-map><input limsid="{input}"/><output limsid="92-9" output-type="ResultFile" output-generation-type="PerAllInputs"/></input-output-map>"#
            ));
        }
        format!(
            r#"<prc:process xmlns:prc="http://genologics.com/ri/process" limsid="{PID}">{maps}</prc:process>"#
        )
    }

    fn artifact_xml(
        limsid: &str,
        name: &str,
        kind: &str,
        well: Option<&str>,
        file: Option<&str>,
    ) -> String {
        let location = well.map_or_else(String::new, |well| {
            format!(r#"<location><container limsid="27-1"/><value>{well}</value></location>"#)
        });
        let file = file.map_or_else(String::new, |id| {
            format!(r#"<file:file limsid="{id}"/>"#)
        });
        format!(
            r#"<art:artifact xmlns:udf="http://genologics.com/ri/userdefined" xmlns:file="http://genologics.com/ri/file" xmlns:art="http://genologics.com/ri/artifact" limsid="{limsid}"><name>{name}</name><type>{kind}</type>{location}{file}</art:artifact>"#
        )
    }

    fn lims_with_sheet(sheet: &[u8]) -> MockLims {
        MockLims::new()
            .with_process(PID, &process_xml())
            .unwrap()
            .with_artifact("2-1", &artifact_xml("2-1", "S1", "Analyte", Some("A:1"), None))
            .unwrap()
            .with_artifact("2-2", &artifact_xml("2-2", "S2", "Analyte", Some("B:1"), None))
            .unwrap()
            .with_artifact("92-1", &artifact_xml("92-1", "S1", "ResultFile", Some("A:1"), None))
            .unwrap()
            .with_artifact("92-2", &artifact_xml("92-2", "S2", "ResultFile", Some("B:1"), None))
            .unwrap()
            .with_artifact(
                "92-9",
                &artifact_xml("92-9", SPARK_FILE, "ResultFile", None, Some("40-1")),
            )
            .unwrap()
            .with_file("40-1", sheet)
            .unwrap()
    }

    fn settings(extra: &[&str]) -> AssignSettings {
        let mut argv = vec![
            "sparkquant",
            "--pid",
            PID,
            "--concentrationUdf",
            CONC_UDF,
            "--sparkOutputFilename",
            SPARK_FILE,
        ];
        argv.extend_from_slice(extra);
        AssignSettings::from_args(&Args::try_parse_from(argv).unwrap()).unwrap()
    }

    fn exit_code(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<SparkError>()
            .map_or(0, SparkError::exit_code)
    }

    #[test]
    fn assigns_concentrations_to_outputs() {
        let lims = lims_with_sheet(&standard_sheet());

        let report = AssignOperation::new(settings(&[]), &lims).execute().unwrap();

        assert_eq!(report.assignments.len(), 2);
        assert_eq!(report.assignments[0].well, "A1");
        assert_eq!(report.assignments[0].row, 4);
        assert_eq!(report.assignments[0].sample, "S1");
        assert_eq!(report.assignments[0].artifact, "92-1");
        assert_eq!(report.assignments[1].artifact, "92-2");
        assert!(report.assignments[1].concentration.abs() < f64::EPSILON);

        let puts = lims.puts().unwrap();
        assert_eq!(puts.len(), 2);
        let first = parse_artifact(&puts[0]).unwrap();
        assert_eq!(first.limsid, "92-1");
        assert_eq!(first.udfs.len(), 1);
        assert_eq!(first.udfs[0].name, CONC_UDF);
        assert_eq!(first.udfs[0].value, "10");
        let second = parse_artifact(&puts[1]).unwrap();
        assert_eq!(second.udfs[0].value, "0");
    }

    #[test]
    fn converts_to_nanomolar() {
        let lims = lims_with_sheet(&standard_sheet());
        let settings = settings(&[
            "--convertToNm",
            "--fragmentSize",
            "620 bp",
            "--concentrationUdfNm",
            NM_UDF,
        ]);

        let report = AssignOperation::new(settings, &lims).execute().unwrap();

        let nm = report.assignments[0].concentration_nm.unwrap();
        assert!((nm - 24.8139).abs() < 1e-3);

        let put = parse_artifact(&lims.puts().unwrap()[0]).unwrap();
        assert_eq!(put.udfs.len(), 2);
        assert_eq!(put.udfs[1].name, NM_UDF);
        assert!((put.udfs[1].value.parse::<f64>().unwrap() - nm).abs() < 1e-9);
    }

    #[test]
    fn no_calc_uses_raw_value() {
        let sheet = workbook(&[[Cell::Text("A1"), Cell::Number(2.5), Cell::Text("NoCalc")]]);
        let lims = lims_with_sheet(&sheet);

        let report = AssignOperation::new(settings(&[]), &lims).execute().unwrap();

        assert_eq!(report.assignments.len(), 1);
        assert!((report.assignments[0].concentration - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let lims = lims_with_sheet(&standard_sheet());

        let report = AssignOperation::new(settings(&["--dry-run"]), &lims)
            .execute()
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.assignments.len(), 2);
        assert!(lims.puts().unwrap().is_empty());
    }

    #[test]
    fn missing_spark_file() {
        let lims = lims_with_sheet(&standard_sheet());
        let mut settings = settings(&[]);
        settings.spark_output_filename = "Spark LowSens File".to_owned();

        let err = AssignOperation::new(settings, &lims).execute().unwrap_err();

        assert_eq!(exit_code(&err), 3);
        assert!(err.to_string().contains("are you sure it has been uploaded?"));
    }

    #[test]
    fn spark_file_not_uploaded() {
        let lims = lims_with_sheet(&standard_sheet())
            .with_artifact(
                "92-9",
                &artifact_xml("92-9", SPARK_FILE, "ResultFile", None, None),
            )
            .unwrap();

        let err = AssignOperation::new(settings(&[]), &lims).execute().unwrap_err();

        assert_eq!(exit_code(&err), 3);
        assert!(err.to_string().contains("no file attached"));
    }

    #[test]
    fn unknown_well_stops_after_committed_rows() {
        let sheet = workbook(&[
            [Cell::Text("A1"), Cell::Blank, Cell::Number(4.0)],
            [Cell::Text("H12"), Cell::Blank, Cell::Number(5.0)],
            [Cell::Text("B1"), Cell::Blank, Cell::Number(6.0)],
        ]);
        let lims = lims_with_sheet(&sheet);

        let err = AssignOperation::new(settings(&[]), &lims).execute().unwrap_err();

        assert_eq!(exit_code(&err), 5);
        assert!(
            err.to_string()
                .contains("Cannot find sample at well position H12, row 2")
        );
        assert_eq!(lims.puts().unwrap().len(), 1);
    }

    #[test]
    fn invalid_concentration_writes_nothing() {
        let sheet = workbook(&[
            [Cell::Text("A1"), Cell::Blank, Cell::Number(4.0)],
            [Cell::Text("B1"), Cell::Blank, Cell::Text("Overflow")],
        ]);
        let lims = lims_with_sheet(&sheet);

        let err = AssignOperation::new(settings(&[]), &lims).execute().unwrap_err();

        assert_eq!(exit_code(&err), 6);
        assert!(lims.puts().unwrap().is_empty());
    }

    #[test]
    fn missing_process_is_lims_error() {
        let lims = MockLims::new();

        let err = AssignOperation::new(settings(&[]), &lims).execute().unwrap_err();

        assert_eq!(exit_code(&err), 2);
        assert!(format!("{err:#}").contains("Process not found: 24-100"));
    }

    #[test]
    fn convert_requires_nm_udf() {
        let args = Args::try_parse_from([
            "sparkquant",
            "--pid",
            PID,
            "--concentrationUdf",
            CONC_UDF,
            "--sparkOutputFilename",
            SPARK_FILE,
            "--convertToNm",
        ])
        .unwrap();

        let err = AssignSettings::from_args(&args).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert!(err.to_string().contains("--concentrationUdfNm is required"));
    }

    #[test]
    fn invalid_fragment_size_rejected_up_front() {
        let args = Args::try_parse_from([
            "sparkquant",
            "--pid",
            PID,
            "--concentrationUdf",
            CONC_UDF,
            "--sparkOutputFilename",
            SPARK_FILE,
            "--convertToNm",
            "--concentrationUdfNm",
            NM_UDF,
            "--fragmentSize",
            "about 600",
        ])
        .unwrap();

        let err = AssignSettings::from_args(&args).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert!(err.to_string().contains("Invalid fragment size 'about 600'"));
    }
}
