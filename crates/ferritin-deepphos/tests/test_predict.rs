use anyhow::Result;
use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use ferritin_deepphos::weights::{weights_path, OUTPUT_SUFFIX};
use ferritin_deepphos::{
    DeepPhos, DeepPhosConfig, Hierarchy, PredictError, PredictFrame, PredictOptions,
    PredictionRequest, Predictor, SiteType,
};
use ferritin_test_data::TestFile;
use std::path::Path;

/// Randomly initialised weights saved under the name `frame` resolves to.
fn write_weights(models_dir: &Path, frame: &PredictFrame, cfg: &DeepPhosConfig) -> Result<()> {
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    DeepPhos::load(vb, cfg)?;
    varmap.save(weights_path(models_dir, frame))?;
    Ok(())
}

fn options(root: &Path) -> PredictOptions {
    PredictOptions {
        models_dir: root.join("models"),
        output_root: root.join("processed"),
        cpu: true,
        ..Default::default()
    }
}

/// (id, position, score) with the quotes removed.
fn read_output(path: &Path) -> Result<Vec<(String, usize, f32)>> {
    let text = std::fs::read_to_string(path)?;
    text.lines()
        .map(|line| -> Result<(String, usize, f32)> {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 3, "expected three columns: {line}");
            for field in &fields {
                assert!(
                    field.starts_with('"') && field.ends_with('"'),
                    "unquoted field in {line}"
                );
            }
            let unquote = |s: &str| s.trim_matches('"').to_string();
            Ok((
                unquote(fields[0]),
                unquote(fields[1]).parse::<usize>()?,
                unquote(fields[2]).parse::<f32>()?,
            ))
        })
        .collect()
}

#[test]
fn test_general_serine_threonine() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let frame = PredictFrame::general(SiteType::SerThr);
    std::fs::create_dir_all(&opts.models_dir)?;
    write_weights(&opts.models_dir, &frame, &opts.model_config)?;

    let (table, _temp) = TestFile::sites_01().create_temp()?;
    let predictor = Predictor::new(opts)?;
    let report = predictor.predict(&PredictionRequest {
        table: table.into(),
        frame,
        folder: "run1".to_string(),
    })?;

    assert_eq!(
        report.output,
        root.path()
            .join("processed/run1")
            .join(format!("general_ST_{OUTPUT_SUFFIX}"))
    );
    assert_eq!(report.rows_read, 15);
    assert_eq!(report.rows_scored, 10);

    let rows = read_output(&report.output)?;
    assert_eq!(rows.len(), 10);
    let positions: Vec<usize> = rows.iter().map(|r| r.1).collect();
    assert_eq!(positions, vec![6, 9, 15, 18, 20, 33, 37, 46, 55, 2]);
    assert!(rows[..9].iter().all(|r| r.0 == "P04637"));
    assert_eq!(rows[9].0, "P62805");
    assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.2)));
    Ok(())
}

#[test]
fn test_general_tyrosine() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let frame = PredictFrame::general(SiteType::Tyr);
    std::fs::create_dir_all(&opts.models_dir)?;
    write_weights(&opts.models_dir, &frame, &opts.model_config)?;

    let (table, _temp) = TestFile::sites_01().create_temp()?;
    let report = Predictor::new(opts)?.predict(&PredictionRequest {
        table: table.into(),
        frame,
        folder: "run1".to_string(),
    })?;

    assert!(report
        .weights
        .ends_with("models/model_general_Y.safetensors"));
    let rows = read_output(&report.output)?;
    let sites: Vec<(&str, usize)> = rows.iter().map(|r| (r.0.as_str(), r.1)).collect();
    assert_eq!(
        sites,
        vec![
            ("P04637", 103),
            ("P04637", 107),
            ("P04637", 126),
            ("P62805", 52),
            ("P62805", 99)
        ]
    );
    Ok(())
}

#[test]
fn test_kinase_model() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let frame = PredictFrame::kinase(SiteType::SerThr, Hierarchy::Group, "AGC")?;
    std::fs::create_dir_all(&opts.models_dir)?;
    write_weights(&opts.models_dir, &frame, &opts.model_config)?;

    let (table, _temp) = TestFile::sites_header_01().create_temp()?;
    let opts = PredictOptions {
        has_header: true,
        ..opts
    };
    let report = Predictor::new(opts)?.predict(&PredictionRequest {
        table: table.into(),
        frame,
        folder: "kinase".to_string(),
    })?;

    assert!(report.weights.ends_with("models/model_group_AGC.safetensors"));
    assert!(report
        .output
        .ends_with("kinase/kinase_group_AGCprediction_phosphorylation.txt"));
    assert_eq!(read_output(&report.output)?.len(), 4);
    Ok(())
}

#[test]
fn test_missing_weights() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let output_root = opts.output_root.clone();
    let (table, _temp) = TestFile::sites_01().create_temp()?;

    let err = Predictor::new(opts)?
        .predict(&PredictionRequest {
            table: table.into(),
            frame: PredictFrame::general(SiteType::Tyr),
            folder: "run1".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        PredictError::MissingWeights(ref p) if p.ends_with("model_general_Y.safetensors")
    ));
    assert!(!output_root.exists());
    Ok(())
}

#[test]
fn test_no_matching_sites_writes_empty_file() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = PredictOptions {
        has_header: true,
        ..options(root.path())
    };
    let frame = PredictFrame::general(SiteType::Tyr);
    std::fs::create_dir_all(&opts.models_dir)?;
    // never loaded: the table holds serine/threonine sites only
    std::fs::write(weights_path(&opts.models_dir, &frame), b"")?;

    let (table, _temp) = TestFile::sites_header_01().create_temp()?;
    let report = Predictor::new(opts)?.predict(&PredictionRequest {
        table: table.into(),
        frame,
        folder: "run1".to_string(),
    })?;
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_scored, 0);
    assert!(read_output(&report.output)?.is_empty());
    Ok(())
}

#[test]
fn test_batching_and_reruns_agree() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let frame = PredictFrame::general(SiteType::SerThr);
    std::fs::create_dir_all(&opts.models_dir)?;
    write_weights(&opts.models_dir, &frame, &opts.model_config)?;
    let (table, _temp) = TestFile::sites_01().create_temp()?;

    let run = |batch_size: usize, folder: &str| -> Result<std::path::PathBuf> {
        let opts = PredictOptions {
            batch_size,
            ..options(root.path())
        };
        let report = Predictor::new(opts)?.predict(&PredictionRequest {
            table: table.clone().into(),
            frame: frame.clone(),
            folder: folder.to_string(),
        })?;
        Ok(report.output)
    };

    let full = run(512, "full")?;
    let again = run(512, "again")?;
    let batched = run(3, "batched")?;

    assert_eq!(std::fs::read(&full)?, std::fs::read(&again)?);
    let full = read_output(&full)?;
    let batched = read_output(&batched)?;
    assert_eq!(full.len(), batched.len());
    for (a, b) in full.iter().zip(batched.iter()) {
        assert_eq!((&a.0, a.1), (&b.0, b.1));
        assert!((a.2 - b.2).abs() < 1e-5);
    }
    Ok(())
}

#[test]
fn test_position_out_of_range() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let frame = PredictFrame::general(SiteType::SerThr);
    std::fs::create_dir_all(&opts.models_dir)?;
    write_weights(&opts.models_dir, &frame, &opts.model_config)?;

    let table = root.path().join("bad.csv");
    std::fs::write(&table, "P1,40,S,MSKT\n")?;
    let err = Predictor::new(opts)?
        .predict(&PredictionRequest {
            table,
            frame,
            folder: "run1".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, PredictError::Features(_)));
    Ok(())
}

#[test]
fn test_empty_table_writes_empty_file() -> Result<()> {
    let root = tempfile::tempdir()?;
    let frame = PredictFrame::general(SiteType::SerThr);
    let table = root.path().join("empty.csv");
    std::fs::write(&table, "")?;

    for has_header in [false, true] {
        let opts = PredictOptions {
            has_header,
            ..options(root.path())
        };
        std::fs::create_dir_all(&opts.models_dir)?;
        // never loaded: there is nothing to score
        std::fs::write(weights_path(&opts.models_dir, &frame), b"")?;

        let report = Predictor::new(opts)?.predict(&PredictionRequest {
            table: table.clone(),
            frame: frame.clone(),
            folder: format!("header_{has_header}"),
        })?;
        assert_eq!(report.rows_read, 0);
        assert_eq!(report.rows_scored, 0);
        assert!(report.output.is_file());
        assert!(std::fs::read_to_string(&report.output)?.trim().is_empty());
    }
    Ok(())
}

#[test]
fn test_positions_written_as_read() -> Result<()> {
    let root = tempfile::tempdir()?;
    let opts = options(root.path());
    let frame = PredictFrame::general(SiteType::SerThr);
    std::fs::create_dir_all(&opts.models_dir)?;
    write_weights(&opts.models_dir, &frame, &opts.model_config)?;

    let table = root.path().join("padded.csv");
    std::fs::write(
        &table,
        "P62805,002,S,MSGRGKGGKGLGKGG\n\
         P62805,7,G,MSGRGKGGKGLGKGG\n\
         P62805,0011,L,MSGRGKGGKGLGKGG\n",
    )?;
    let report = Predictor::with_device(opts, Device::Cpu)?.predict(&PredictionRequest {
        table,
        frame,
        folder: "padded".to_string(),
    })?;
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_scored, 1);

    let text = std::fs::read_to_string(&report.output)?;
    let fields: Vec<&str> = text.trim_end().split('\t').collect();
    assert_eq!(fields[..2], ["\"P62805\"", "\"002\""]);
    Ok(())
}
