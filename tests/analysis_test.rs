//! Analysis pipeline tests
//!
//! The compute steps are tested on small in-memory tables; the full runs,
//! which render PNG charts, are kept behind `--ignored` because the test
//! environment has no fonts.

mod common;

use aioe_analysis::Result;
use aioe_analysis::analysis::{Analysis, disparities, employment, postings, skills};
use aioe_analysis::config::AnalysisConfig;
use aioe_analysis::models::{
    CorrelationRow, EducationRecord, EmploymentRecord, ExposureRecord, PostingsPoint, SkillMatrix,
    SkillRow,
};
use common::{fixture_dir, write_fixture, write_fixture_bytes};
use std::path::Path;

fn exposure_record(soc: &str, aioe: f64) -> ExposureRecord {
    ExposureRecord {
        soc: soc.to_string(),
        aioe,
    }
}

fn employment_record(
    soc: &str,
    employment: Option<f64>,
    annual_wage: Option<f64>,
) -> EmploymentRecord {
    EmploymentRecord {
        soc: soc.to_string(),
        employment,
        annual_wage,
    }
}

fn education_record(soc: &str, advanced_share: f64) -> EducationRecord {
    EducationRecord {
        soc: soc.to_string(),
        advanced_share,
    }
}

fn skill_row(soc: &str, scores: Vec<Option<f64>>) -> SkillRow {
    SkillRow {
        soc: soc.to_string(),
        scores,
    }
}

fn postings_point(entity: &str, code: &str, year: i32, share: f64) -> PostingsPoint {
    PostingsPoint {
        entity: entity.to_string(),
        code: code.to_string(),
        year,
        share,
    }
}

// Employment growth

#[test]
fn test_employment_growth_three_rows_three_bins() -> Result<()> {
    let exposure = vec![
        exposure_record("11-1011", 0.1),
        exposure_record("13-2011", 0.5),
        exposure_record("15-1252", 0.9),
    ];
    let snapshot_2013 = vec![
        employment_record("11-1011", Some(100.0), None),
        employment_record("13-2011", Some(100.0), None),
        employment_record("15-1252", Some(100.0), None),
    ];
    let snapshot_2023 = vec![
        employment_record("11-1011", Some(110.0), None),
        employment_record("13-2011", Some(100.0), None),
        employment_record("15-1252", Some(90.0), None),
    ];

    let bins = employment::compute(&exposure, &snapshot_2013, &snapshot_2023)?;
    assert_eq!(bins.len(), 3);
    assert_eq!(bins[0].value, Some(10.0));
    assert_eq!(bins[1].value, Some(0.0));
    assert_eq!(bins[2].value, Some(-10.0));
    assert!(bins.iter().all(|summary| summary.count == 1));
    Ok(())
}

#[test]
fn test_employment_growth_joins_on_shared_codes_only() -> Result<()> {
    // Three exposure rows against two snapshot rows sharing one code.
    let exposure = vec![
        exposure_record("11-1011", 0.1),
        exposure_record("13-2011", 0.5),
        exposure_record("15-1252", 0.9),
    ];
    let snapshot_2013 = vec![
        employment_record("13-2011", Some(50.0), None),
        employment_record("99-9999", Some(10.0), None),
    ];
    let snapshot_2023 = vec![employment_record("13-2011", Some(75.0), None)];

    let bins = employment::compute(&exposure, &snapshot_2013, &snapshot_2023)?;
    // The single joined row lands in the first of two bins.
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0].count, 1);
    assert_eq!(bins[0].value, Some(50.0));
    assert_eq!(bins[1].count, 0);
    assert_eq!(bins[1].value, None);
    Ok(())
}

#[test]
fn test_employment_growth_requires_both_employment_values() -> Result<()> {
    let exposure = vec![
        exposure_record("11-1011", 0.1),
        exposure_record("13-2011", 0.5),
    ];
    let snapshot_2013 = vec![
        employment_record("11-1011", Some(100.0), None),
        employment_record("13-2011", None, None),
    ];
    let snapshot_2023 = vec![
        employment_record("11-1011", Some(120.0), None),
        employment_record("13-2011", Some(50.0), None),
    ];

    let bins = employment::compute(&exposure, &snapshot_2013, &snapshot_2023)?;
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0].count, 1);
    assert_eq!(bins[0].value, Some(20.0));
    Ok(())
}

#[test]
fn test_employment_growth_uses_first_occurrence_of_duplicate_codes() -> Result<()> {
    let exposure = vec![exposure_record("11-1011", 0.1)];
    let snapshot_2013 = vec![
        employment_record("11-1011", Some(100.0), None),
        employment_record("11-1011", Some(999.0), None),
    ];
    let snapshot_2023 = vec![employment_record("11-1011", Some(150.0), None)];

    let bins = employment::compute(&exposure, &snapshot_2013, &snapshot_2023)?;
    assert_eq!(bins[0].value, Some(50.0));
    Ok(())
}

#[test]
fn test_employment_growth_errors_when_nothing_joins() {
    let exposure = vec![exposure_record("11-1011", 0.1)];
    let snapshot = vec![employment_record("99-9999", Some(1.0), None)];
    assert!(employment::compute(&exposure, &snapshot, &snapshot).is_err());
}

// Wage and education disparities

#[test]
fn test_wage_bins_drop_rows_without_a_wage() -> Result<()> {
    let exposure = vec![
        exposure_record("11-1011", 0.2),
        exposure_record("13-2011", 0.7),
    ];
    let snapshot = vec![
        employment_record("11-1011", Some(10.0), Some(90_000.0)),
        employment_record("13-2011", Some(20.0), None),
    ];

    let bins = disparities::compute_wage_bins(&exposure, &snapshot)?;
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0].count, 1);
    assert_eq!(bins[0].value, Some(90_000.0));
    assert_eq!(bins[1].count, 0);
    Ok(())
}

#[test]
fn test_wage_bins_fill_missing_weights_with_unit() -> Result<()> {
    // Twelve joined rows produce ten bins; the two lowest-exposure rows
    // share bin 1 and neither has an employment count.
    let mut exposure = Vec::new();
    let mut snapshot = Vec::new();
    for index in 0..12 {
        let code = format!("11-10{index:02}");
        exposure.push(exposure_record(&code, f64::from(index)));
        let (employment, wage) = match index {
            0 => (None, Some(10.0)),
            1 => (None, Some(30.0)),
            _ => (Some(100.0), Some(50.0)),
        };
        snapshot.push(employment_record(&code, employment, wage));
    }

    let bins = disparities::compute_wage_bins(&exposure, &snapshot)?;
    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].count, 2);
    assert_eq!(bins[0].value, Some(20.0));
    Ok(())
}

#[test]
fn test_education_groups_split_at_quintiles() -> Result<()> {
    let codes: Vec<String> = (0..5).map(|index| format!("11-10{index:02}")).collect();
    let exposure: Vec<ExposureRecord> = codes
        .iter()
        .enumerate()
        .map(|(index, code)| exposure_record(code, 0.1 * (index + 1) as f64))
        .collect();
    let snapshot: Vec<EmploymentRecord> = codes
        .iter()
        .map(|code| employment_record(code, Some(1.0), None))
        .collect();
    let education: Vec<EducationRecord> = codes
        .iter()
        .enumerate()
        .map(|(index, code)| education_record(code, 10.0 * (index + 1) as f64))
        .collect();

    let (low, high) = disparities::compute_education_groups(&exposure, &snapshot, &education)?;
    // The 20th percentile of the scores is 0.18 and the 80th is 0.42, so
    // exactly one row falls in each group.
    assert_eq!(low, Some(10.0));
    assert_eq!(high, Some(50.0));
    Ok(())
}

#[test]
fn test_education_groups_overlap_with_identical_scores() -> Result<()> {
    let exposure = vec![
        exposure_record("11-1011", 1.0),
        exposure_record("13-2011", 1.0),
    ];
    let snapshot = vec![
        employment_record("11-1011", None, None),
        employment_record("13-2011", None, None),
    ];
    let education = vec![
        education_record("11-1011", 20.0),
        education_record("13-2011", 40.0),
    ];

    let (low, high) = disparities::compute_education_groups(&exposure, &snapshot, &education)?;
    // Identical scores put both rows in both groups, with unit weights.
    assert_eq!(low, Some(30.0));
    assert_eq!(high, Some(30.0));
    Ok(())
}

// Skill correlates

#[test]
fn test_skill_correlations_sorted_descending() -> Result<()> {
    let exposure = vec![
        exposure_record("11-1011", 1.0),
        exposure_record("13-2011", 2.0),
        exposure_record("15-1252", 3.0),
    ];
    let matrix = SkillMatrix {
        categories: vec![
            "Aligned".to_string(),
            "Opposed".to_string(),
            "Unmeasured".to_string(),
        ],
        rows: vec![
            skill_row("11-1011", vec![Some(1.0), Some(3.0), None]),
            skill_row("13-2011", vec![Some(2.0), Some(2.0), None]),
            skill_row("15-1252", vec![Some(3.0), Some(1.0), None]),
        ],
    };

    let rows = skills::compute(&exposure, &matrix)?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].category, "Aligned");
    assert_eq!(rows[0].coefficient, Some(1.0));
    assert_eq!(rows[1].category, "Opposed");
    assert_eq!(rows[1].coefficient, Some(-1.0));
    assert_eq!(rows[2].category, "Unmeasured");
    assert_eq!(rows[2].coefficient, None);
    Ok(())
}

#[test]
fn test_select_extremes_repeats_rows_of_short_tables() {
    let rows: Vec<CorrelationRow> = (0..3)
        .map(|index| CorrelationRow {
            category: format!("c{index}"),
            coefficient: Some(f64::from(index)),
        })
        .collect();

    let extremes = skills::select_extremes(&rows, 10);
    assert_eq!(extremes.len(), 6);
    assert_eq!(extremes[0].category, "c0");
    assert_eq!(extremes[3].category, "c0");
}

#[test]
fn test_select_extremes_takes_both_ends() {
    let rows: Vec<CorrelationRow> = (0..25)
        .map(|index| CorrelationRow {
            category: format!("c{index}"),
            coefficient: Some(f64::from(index)),
        })
        .collect();

    let extremes = skills::select_extremes(&rows, 10);
    assert_eq!(extremes.len(), 20);
    assert_eq!(extremes[0].category, "c0");
    assert_eq!(extremes[9].category, "c9");
    assert_eq!(extremes[10].category, "c15");
    assert_eq!(extremes[19].category, "c24");
}

// Postings trend

#[test]
fn test_postings_series_filters_and_sorts() {
    let points = vec![
        postings_point("United States", "USA", 2016, 0.45),
        postings_point("United Kingdom", "GBR", 2014, 0.1),
        postings_point("United States", "USA", 2014, 0.2),
    ];

    let series = postings::compute(&points, "USA");
    assert_eq!(series, vec![(2014, 0.2), (2016, 0.45)]);
}

// Full pipeline

fn write_source_tables(dir: &Path) {
    write_fixture(
        dir,
        "AIOE_DataAppendix(Appendix A).csv",
        "Occupation Title,SOC Code,AIOE\n\
         Chief Executives,11-1011.00,0.9\n\
         Accountants,13-2011.00,0.4\n\
         Software Developers,15-1252.00,1.5\n\
         Registered Nurses,29-1141.00,-0.2\n\
         Cashiers,41-2011.00,-0.8\n",
    );
    write_fixture(
        dir,
        "national_M2013_dl(national_dl).csv",
        "OCC_CODE,OCC_TITLE,TOT_EMP,A_MEDIAN\n\
         00-0000,All Occupations,\"100,000\",\"40,000\"\n\
         11-1011,Chief Executives,\"1,000\",\"170,000\"\n\
         13-2011,Accountants,\"2,000\",\"63,000\"\n\
         15-1252,Software Developers,\"3,000\",\"92,000\"\n\
         29-1141,Registered Nurses,\"4,000\",\"66,000\"\n\
         41-2011,Cashiers,\"5,000\",\"18,000\"\n",
    );
    write_fixture(
        dir,
        "national_M2023_dl(national_M2023_dl).csv",
        "OCC_CODE,OCC_TITLE,TOT_EMP,A_MEDIAN\n\
         00-0000,All Occupations,\"110,000\",\"48,000\"\n\
         11-1011,Chief Executives,\"1,100\",\"200,000\"\n\
         13-2011,Accountants,\"2,000\",\"79,000\"\n\
         15-1252,Software Developers,\"4,500\",\"130,000\"\n\
         29-1141,Registered Nurses,\"4,400\",\"86,000\"\n\
         41-2011,Cashiers,\"4,000\",*\n",
    );
    write_fixture_bytes(
        dir,
        "skills(Table 6.csv",
        b"Table 6. Skill importance by occupation\n\
          Occupation,Matrix code,Employment 2023,Reading,Writing,Notes\n\
          Chief Executives,11-1011.00,1100,4.5,4.0,high\n\
          Accountants,13-2011.00,2000,4.0,3.5,mid\n\
          Software Developers,15-1252.00,4500,4.8,3.8,high\n\
          Registered Nurses,29-1141.00,4400,4.2,3.9,mid\n\
          Caf\xe9 managers and cashiers,41-2011.00,4000,2.0,1.5,low\n",
    );
    write_fixture(
        dir,
        "education(Table 5.csv",
        "Table 5. Entry-level education by occupation\n\
         Occupation,2023 National Employment Matrix code,Bachelor's degree,\
         Master's degree,Doctoral or professional degree\n\
         Chief Executives,11-1011.00,60.0,25.0,5.0\n\
         Accountants,13-2011.00,70.0,15.0,2.0\n\
         Software Developers,15-1252.00,65.0,20.0,3.0\n\
         Registered Nurses,29-1141.00,55.0,10.0,2.0\n\
         Cashiers,41-2011.00,5.0,1.0,0.2\n",
    );
    write_fixture(
        dir,
        "share-artificial-intelligence-job-postings.csv",
        "Entity,Code,Year,Share of artificial intelligence jobs among all job postings\n\
         United States,USA,2014,0.2\n\
         United States,USA,2015,0.3\n\
         United States,USA,2016,0.45\n\
         United Kingdom,GBR,2014,0.1\n",
    );
}

#[test]
#[ignore = "Font rendering not available in test environment"]
fn test_full_run_writes_every_artifact() -> Result<()> {
    let data = fixture_dir();
    let output = fixture_dir();
    write_source_tables(data.path());

    let config = AnalysisConfig {
        data_dir: data.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        write_bin_tables: true,
        postings_country: "USA".to_string(),
    };

    let mut artifacts = Vec::new();
    for analysis in Analysis::ALL {
        artifacts.extend(analysis.run(&config)?);
    }

    // Five charts, the correlation table and two bin tables.
    assert_eq!(artifacts.len(), 8);
    for path in &artifacts {
        assert!(path.exists(), "missing artifact {}", path.display());
    }

    let table =
        std::fs::read_to_string(data.path().join("q2_top_skills_correlations.csv")).unwrap();
    assert!(table.starts_with("Skill_Category,Correlation"));
    Ok(())
}
