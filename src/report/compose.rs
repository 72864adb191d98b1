//! Report composition — the fixed eight-page layout.
//!
//! `compose_report` is a total, deterministic function from (form payload,
//! medication catalog, report date) to a [`ReportDocument`]. Missing data
//! renders as blank cells; nothing here errors or touches a clock. The page
//! sequence, coordinates and fixed copy reproduce the clinic's report
//! template exactly.

use chrono::NaiveDate;

use crate::measurements::{calculate_age, calculate_bmi, convert_to_kg, MISSING};
use crate::models::{MedicationCatalogEntry, PatientFormData};

use super::document::{
    Callout, Column, Figure, Page, PageElement, ReportDocument, Table, TextBlock, TextStyle,
    CONTENT_MARGIN_MM, CONTENT_WIDTH_MM,
};

// ── Layout rules ────────────────────────────────────────────────────────────

/// Short medication/supplement/follow-up lists are topped up with blank
/// rows so table heights stay stable across patients; longer lists render
/// in full, never truncated.
const MIN_MEDICATION_ROWS: usize = 5;
const MIN_SUPPLEMENT_ROWS: usize = 4;
const MIN_FOLLOW_UP_ROWS: usize = 4;

/// Vertical room the insulin-resistance section occupies on page four; the
/// cardiovascular table moves down by this much when the section is shown.
const INSULIN_SECTION_SHIFT_MM: f64 = 85.0;

const BLOOD_PRESSURE_TARGET: &str = "120/60-140/85";
const BMI_TARGET: &str = "18.5 – 25.9";

const CARDIO_MEN_ROW: [&str; 4] = ["Men", "0.30-to-0.69", "0.70-to-0.89", "0.90-to-1.2"];
const CARDIO_WOMEN_ROW: [&str; 4] = ["Women", "0.30-to-0.59", "0.60-to-0.79", "0.80-to-1.00"];

const SIGNATURE_NAME: &str = "Dr Eslam Yakout";

const COVER_STATISTICS: [&str; 3] = [
    "6 out of 10 causes\nof death are\npreventable",
    "We only spend 3%\nof our health care\nexpenditure on\nprevention",
    "90% of our health\ncare expenditure\noccurs in the last 3\nyears of our lives",
];

// TODO: drop these example rows once the report layout tolerates an empty
// medications table; they predate form-entered medications.
const MEDICATION_EXAMPLE_ROWS: [[&str; 3]; 2] = [
    ["Jardiance", "25mg Once daily with food (am)", "Prescription"],
    ["Crestor", "20mg at night", "Prescription"],
];

/// Compose the full report for one patient.
///
/// `today` is the date the report is issued, injected so age calculation
/// (and therefore the whole document) is reproducible.
pub fn compose_report(
    form: &PatientFormData,
    catalog: &[MedicationCatalogEntry],
    today: NaiveDate,
) -> ReportDocument {
    let page_contents = vec![
        cover_page(),
        introduction_page(form, today),
        findings_page(form),
        risk_page(form),
        nutrition_page(form),
        lifestyle_page(form),
        prescriptions_page(form, catalog),
        follow_up_page(form),
    ];

    ReportDocument {
        title: format!("{} Medical Report", form.patient_info.name),
        pages: page_contents
            .into_iter()
            .enumerate()
            .map(|(i, elements)| Page {
                number: i as u32 + 1,
                elements,
            })
            .collect(),
    }
}

// ── Page 1: cover statistics ────────────────────────────────────────────────

fn cover_page() -> Vec<PageElement> {
    COVER_STATISTICS
        .iter()
        .zip([60.0, 110.0, 160.0])
        .map(|(text, y)| {
            PageElement::Callout(Callout {
                text: (*text).into(),
                y,
                height: 40.0,
            })
        })
        .collect()
}

// ── Page 2: introduction + key vital signs ──────────────────────────────────

fn introduction_page(form: &PatientFormData, today: NaiveDate) -> Vec<PageElement> {
    let info = &form.patient_info;
    let vitals = &form.vitals;
    let m = CONTENT_MARGIN_MM;

    let vitals_rows = vec![
        vec!["Date of Birth".into(), date_of_birth_cell(&info.date_of_birth), MISSING.into()],
        vec![
            "Age (years)".into(),
            calculate_age(&info.date_of_birth, today),
            MISSING.into(),
        ],
        vec![
            "Blood Pressure".into(),
            present_or_dash(&vitals.blood_pressure),
            BLOOD_PRESSURE_TARGET.into(),
        ],
        vec!["Height (cm)".into(), present_or_dash(&vitals.height), MISSING.into()],
        vec!["Weight (Kg)".into(), convert_to_kg(&vitals.weight), MISSING.into()],
        vec![
            "Body Mass Index".into(),
            calculate_bmi(&vitals.height, &vitals.weight),
            BMI_TARGET.into(),
        ],
    ];

    vec![
        PageElement::Text(TextBlock::body("Your step towards ", 70.0, 70.0, 14.0)),
        PageElement::Text(TextBlock::styled(
            "optimal health",
            125.0,
            70.0,
            14.0,
            TextStyle::AccentBold,
        )),
        PageElement::Text(TextBlock::body(".", 164.0, 70.0, 14.0)),
        PageElement::Text(TextBlock::body(
            "Our approach is proactive, rather than reactive,",
            m,
            85.0,
            12.0,
        )),
        PageElement::Text(TextBlock::body("giving you ", m, 92.0, 12.0)),
        PageElement::Text(TextBlock::styled(
            "control of your health",
            45.0,
            92.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Text(TextBlock::body(" throughout your life.", 95.0, 92.0, 12.0)),
        PageElement::Text(TextBlock::body("Dear", m, 105.0, 10.0)),
        PageElement::Text(TextBlock::body(format!("{},", info.name), 35.0, 105.0, 10.0)),
        PageElement::Text(TextBlock::body(
            "It has been a pleasure to welcome you to our Clinic. The entire DNA Health team feels",
            m,
            115.0,
            10.0,
        )),
        PageElement::Text(TextBlock::body(
            "privileged to be a part of your journey to wellness and longevity.",
            m,
            122.0,
            10.0,
        )),
        PageElement::Text(TextBlock::styled(
            "Key vital signs",
            m,
            140.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Table(Table::new(
            m,
            145.0,
            vec![
                Column::new("Vitals", 50.0),
                Column::new("Value", 50.0),
                Column::new("Target Range", 50.0),
            ],
            vitals_rows,
        )),
    ]
}

// ── Page 3: summary of findings ─────────────────────────────────────────────

fn findings_page(form: &PatientFormData) -> Vec<PageElement> {
    let f = &form.summary_findings;
    let m = CONTENT_MARGIN_MM;

    // Fixed parameter order; values fall back to empty cells.
    let rows: Vec<Vec<String>> = [
        ("Glucose Metabolism", &f.glucose_metabolism),
        ("Lipid Profile", &f.lipid_profile),
        ("Inflammation", &f.inflammation),
        ("Uric Acid", &f.uric_acid),
        ("Vitamins", &f.vitamins),
        ("Minerals", &f.minerals),
        ("Sex Hormones", &f.sex_hormones),
        ("Renal & Liver Function", &f.renal_liver_function),
        ("Cancer markers", &f.cancer_markers),
    ]
    .into_iter()
    .map(|(label, value)| vec![label.into(), value.clone()])
    .collect();

    vec![
        PageElement::Text(TextBlock::styled(
            "Summary of findings",
            m,
            70.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Table(Table::new(
            m,
            75.0,
            vec![
                Column::new("Parameters", 50.0),
                Column::new("Key findings and next steps", CONTENT_WIDTH_MM - 50.0),
            ],
            rows,
        )),
    ]
}

// ── Page 4: insulin resistance + cardiovascular risk ────────────────────────

fn risk_page(form: &PatientFormData) -> Vec<PageElement> {
    let m = CONTENT_MARGIN_MM;
    let mut elements = Vec::new();
    let mut start_y = 70.0;

    if form.show_insulin_resistance {
        elements.push(PageElement::Text(TextBlock::styled(
            "Insulin Resistance (Metabolic Syndrome)",
            m,
            start_y,
            12.0,
            TextStyle::Accent,
        )));
        elements.push(PageElement::Figure(Figure {
            source: "assets/insulin-resistance.jpg".into(),
            x: m,
            y: start_y + 10.0,
            width: CONTENT_WIDTH_MM,
            height: 60.0,
        }));
        elements.push(PageElement::Text(
            TextBlock::body(
                "Figure 1: Insulin resistance and resulting metabolic disturbance",
                105.0,
                start_y + 75.0,
                8.0,
            )
            .centered(),
        ));
        start_y += INSULIN_SECTION_SHIFT_MM;
    }

    // Anything that is not exactly "Male" gets the Women row, so an unset
    // or nonbinary gender still highlights a row instead of none.
    let highlight = if form.patient_info.gender == "Male" { 0 } else { 1 };

    elements.push(PageElement::Text(TextBlock::styled(
        "Cardiovascular risk (*Apo B : Apo A1 ratio)",
        m,
        start_y,
        12.0,
        TextStyle::Accent,
    )));
    elements.push(PageElement::Table(
        Table::new(
            m,
            start_y + 5.0,
            vec![
                Column::new("", 40.0),
                Column::new("Low risk", 40.0),
                Column::new("Moderate risk", 40.0),
                Column::new("High risk", 40.0),
            ],
            vec![
                CARDIO_MEN_ROW.iter().map(|s| s.to_string()).collect(),
                CARDIO_WOMEN_ROW.iter().map(|s| s.to_string()).collect(),
            ],
        )
        .with_highlight(highlight),
    ));

    elements
}

// ── Page 5: doctor's nutrition recommendations ──────────────────────────────

fn nutrition_page(form: &PatientFormData) -> Vec<PageElement> {
    let n = &form.nutrition_recommendations;
    let m = CONTENT_MARGIN_MM;

    vec![
        PageElement::Text(TextBlock::styled(
            "Doctors Recommendations",
            m,
            70.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Table(
            Table::new(
                m,
                80.0,
                vec![
                    Column::new("Nutrition", 50.0),
                    Column::new("Recommendations", CONTENT_WIDTH_MM - 50.0),
                ],
                vec![
                    vec!["Style (nutritional plan)".into(), n.nutritional_plan.clone()],
                    vec!["Protein Consumption".into(), n.protein_consumption.clone()],
                    vec!["Omissions".into(), n.omissions.clone()],
                    vec![
                        "Additional Considerations".into(),
                        n.additional_considerations.clone(),
                    ],
                ],
            )
            .with_min_row_height(20.0),
        ),
    ]
}

// ── Page 6: exercise + sleep/stress recommendations ─────────────────────────

fn lifestyle_page(form: &PatientFormData) -> Vec<PageElement> {
    let e = &form.exercise_detail;
    let s = &form.sleep_stress_recommendations;
    let m = CONTENT_MARGIN_MM;

    vec![
        PageElement::Table(
            Table::new(
                m,
                70.0,
                vec![
                    Column::new("Exercise", 50.0),
                    Column::new("Recommendations", CONTENT_WIDTH_MM - 50.0),
                ],
                vec![
                    vec!["Focus on".into(), e.focus_on.clone()],
                    vec!["Walking".into(), e.walking.clone()],
                    vec!["Avoid".into(), e.avoid.clone()],
                    vec!["Tracking".into(), e.tracking.clone()],
                ],
            )
            .with_min_row_height(20.0),
        ),
        PageElement::Table(
            Table::new(
                m,
                170.0,
                vec![
                    Column::new("Sleep and Stress", 50.0),
                    Column::new("Recommendations", CONTENT_WIDTH_MM - 50.0),
                ],
                vec![
                    vec!["Sleep".into(), s.sleep.clone()],
                    vec!["Stress".into(), s.stress.clone()],
                ],
            )
            .with_min_row_height(20.0),
        ),
    ]
}

// ── Page 7: medications + supplements ───────────────────────────────────────

fn prescriptions_page(
    form: &PatientFormData,
    catalog: &[MedicationCatalogEntry],
) -> Vec<PageElement> {
    let m = CONTENT_MARGIN_MM;

    let mut medication_rows: Vec<Vec<String>> = form
        .medications
        .iter()
        .map(|med| {
            vec![
                resolve_name(catalog, &med.medication_id),
                med.dosage.clone(),
                "Prescription".into(),
            ]
        })
        .collect();
    if medication_rows.is_empty() {
        medication_rows = MEDICATION_EXAMPLE_ROWS
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
    }
    let medication_rows = pad_rows(medication_rows, MIN_MEDICATION_ROWS, 3);

    let supplement_rows: Vec<Vec<String>> = form
        .supplements
        .iter()
        .map(|sup| {
            vec![
                resolve_name(catalog, &sup.supplement_id),
                sup.dosage.clone(),
                sup.source.clone(),
            ]
        })
        .collect();
    let supplement_rows = pad_rows(supplement_rows, MIN_SUPPLEMENT_ROWS, 3);

    vec![
        PageElement::Text(TextBlock::styled(
            "Medications",
            m,
            70.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Table(Table::new(
            m,
            80.0,
            vec![
                Column::new("Medications", 50.0),
                Column::new("Dosage", 90.0),
                Column::new("Type", 30.0),
            ],
            medication_rows,
        )),
        PageElement::Text(TextBlock::styled(
            "Supplements",
            m,
            160.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Table(Table::new(
            m,
            170.0,
            vec![
                Column::new("Supplements", 50.0),
                Column::new("Dosage", 90.0),
                Column::new("Source", 30.0),
            ],
            supplement_rows,
        )),
    ]
}

// ── Page 8: follow-ups + signature ──────────────────────────────────────────

fn follow_up_page(form: &PatientFormData) -> Vec<PageElement> {
    let m = CONTENT_MARGIN_MM;

    let rows: Vec<Vec<String>> = form
        .follow_ups
        .iter()
        .map(|fu| vec![fu.with_doctor.clone(), fu.for_reason.clone(), fu.date.clone()])
        .collect();
    let rows = pad_rows(rows, MIN_FOLLOW_UP_ROWS, 3);

    vec![
        PageElement::Text(TextBlock::styled(
            "Follow-ups and referrals",
            m,
            70.0,
            12.0,
            TextStyle::Accent,
        )),
        PageElement::Table(Table::new(
            m,
            80.0,
            vec![
                Column::new("With", 50.0),
                Column::new("For", 90.0),
                Column::new("Date", 30.0),
            ],
            rows,
        )),
        PageElement::Text(TextBlock::body("Kind Regards,", m, 160.0, 10.0)),
        PageElement::Text(TextBlock::styled(
            SIGNATURE_NAME,
            m,
            170.0,
            10.0,
            TextStyle::Bold,
        )),
    ]
}

// ── Shared helpers ──────────────────────────────────────────────────────────

fn present_or_dash(value: &str) -> String {
    if value.is_empty() {
        MISSING.into()
    } else {
        value.into()
    }
}

/// ISO dates render as a short locale date; anything else the form holds
/// passes through as typed, and an empty field shows the sentinel.
fn date_of_birth_cell(date_of_birth: &str) -> String {
    if date_of_birth.is_empty() {
        return MISSING.into();
    }
    match NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d") {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => date_of_birth.to_string(),
    }
}

/// Catalog reference to display name; unresolved references render blank.
fn resolve_name(catalog: &[MedicationCatalogEntry], reference: &str) -> String {
    MedicationCatalogEntry::resolve(catalog, reference)
        .map(|entry| entry.name.clone())
        .unwrap_or_default()
}

fn pad_rows(mut rows: Vec<Vec<String>>, min: usize, width: usize) -> Vec<Vec<String>> {
    while rows.len() < min {
        rows.push(vec![String::new(); width]);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CatalogEntryType, FollowUp, PrescribedMedication, SupplementEntry,
    };
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn catalog_entry(name: &str, entry_type: CatalogEntryType) -> MedicationCatalogEntry {
        MedicationCatalogEntry {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: "500mg".into(),
            frequency: "Once daily".into(),
            notes: None,
            link: None,
            entry_type,
        }
    }

    fn sample_form() -> PatientFormData {
        let mut form = PatientFormData::default();
        form.patient_info.name = "Jane Smith".into();
        form.patient_info.date_of_birth = "2000-06-15".into();
        form.patient_info.gender = "Female".into();
        form.vitals.blood_pressure = "120/80".into();
        form.vitals.height = "5'10\"".into();
        form.vitals.weight = "170".into();
        form
    }

    fn medication_entry(reference: &str) -> PrescribedMedication {
        PrescribedMedication {
            id: "pm".into(),
            medication_id: reference.into(),
            dosage: "500mg".into(),
            frequency: "3 times daily".into(),
            notes: None,
        }
    }

    // ── Page sequence ────────────────────────────────────

    #[test]
    fn eight_pages_numbered_sequentially() {
        let doc = compose_report(&sample_form(), &[], today());
        assert_eq!(doc.pages.len(), 8);
        for (i, page) in doc.pages.iter().enumerate() {
            assert_eq!(page.number, i as u32 + 1);
        }
    }

    #[test]
    fn page_count_is_eight_regardless_of_insulin_flag() {
        let mut form = sample_form();
        assert_eq!(compose_report(&form, &[], today()).pages.len(), 8);
        form.show_insulin_resistance = true;
        assert_eq!(compose_report(&form, &[], today()).pages.len(), 8);
    }

    #[test]
    fn document_title_carries_patient_name() {
        let doc = compose_report(&sample_form(), &[], today());
        assert_eq!(doc.title, "Jane Smith Medical Report");
    }

    // ── Cover page ───────────────────────────────────────

    #[test]
    fn cover_page_has_three_statistics_boxes_and_no_patient_data() {
        let doc = compose_report(&sample_form(), &[], today());
        let cover = &doc.pages[0];
        let callouts: Vec<_> = cover
            .elements
            .iter()
            .filter(|e| matches!(e, PageElement::Callout(_)))
            .collect();
        assert_eq!(callouts.len(), 3);
        assert!(!cover.contains_text("Jane Smith"));
    }

    // ── Introduction + vitals ────────────────────────────

    #[test]
    fn introduction_greets_patient_by_name() {
        let doc = compose_report(&sample_form(), &[], today());
        assert!(doc.pages[1].contains_text("Jane Smith,"));
    }

    #[test]
    fn vitals_table_rows_in_fixed_order_with_derived_values() {
        let doc = compose_report(&sample_form(), &[], today());
        let table = doc.pages[1].tables().next().unwrap();

        let labels: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(
            labels,
            [
                "Date of Birth",
                "Age (years)",
                "Blood Pressure",
                "Height (cm)",
                "Weight (Kg)",
                "Body Mass Index"
            ]
        );

        assert_eq!(table.rows[0][1], "6/15/2000");
        // Birthday (June 15) has not happened yet on June 14.
        assert_eq!(table.rows[1][1], "23");
        assert_eq!(table.rows[2][1], "120/80");
        assert_eq!(table.rows[2][2], "120/60-140/85");
        assert_eq!(table.rows[4][1], "170.0");
        assert_eq!(table.rows[5][1], "53.8");
        assert_eq!(table.rows[5][2], "18.5 – 25.9");
    }

    #[test]
    fn missing_vitals_degrade_to_sentinels() {
        let mut form = sample_form();
        form.patient_info.date_of_birth.clear();
        form.vitals = Default::default();

        let doc = compose_report(&form, &[], today());
        let table = doc.pages[1].tables().next().unwrap();
        for row in &table.rows {
            assert_eq!(row[1], "-", "row {} should be a sentinel", row[0]);
        }
    }

    // ── Summary of findings ──────────────────────────────

    #[test]
    fn findings_page_lists_all_nine_parameters_in_order() {
        let mut form = sample_form();
        form.summary_findings.glucose_metabolism = "HbA1c elevated".into();
        form.summary_findings.cancer_markers = "Within range".into();

        let doc = compose_report(&form, &[], today());
        let table = doc.pages[2].tables().next().unwrap();
        assert_eq!(table.rows.len(), 9);

        let labels: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(
            labels,
            [
                "Glucose Metabolism",
                "Lipid Profile",
                "Inflammation",
                "Uric Acid",
                "Vitamins",
                "Minerals",
                "Sex Hormones",
                "Renal & Liver Function",
                "Cancer markers"
            ]
        );
        assert_eq!(table.rows[0][1], "HbA1c elevated");
        assert_eq!(table.rows[1][1], "");
        assert_eq!(table.rows[8][1], "Within range");
    }

    // ── Insulin resistance + cardiovascular risk ─────────

    #[test]
    fn insulin_section_absent_when_flag_off() {
        let doc = compose_report(&sample_form(), &[], today());
        let page = &doc.pages[3];
        assert!(!page.contains_text("Insulin Resistance"));
        assert!(!page
            .elements
            .iter()
            .any(|e| matches!(e, PageElement::Figure(_))));
        // Cardiovascular table sits in the top position.
        assert_eq!(page.tables().next().unwrap().y, 75.0);
    }

    #[test]
    fn insulin_section_present_shifts_cardio_table_down() {
        let mut form = sample_form();
        form.show_insulin_resistance = true;

        let doc = compose_report(&form, &[], today());
        let page = &doc.pages[3];
        assert!(page.contains_text("Insulin Resistance (Metabolic Syndrome)"));
        assert!(page.contains_text("Figure 1:"));
        assert!(page
            .elements
            .iter()
            .any(|e| matches!(e, PageElement::Figure(_))));
        assert_eq!(page.tables().next().unwrap().y, 160.0);
    }

    #[test]
    fn cardio_highlight_follows_gender() {
        let mut form = sample_form();

        form.patient_info.gender = "Male".into();
        let doc = compose_report(&form, &[], today());
        assert_eq!(doc.pages[3].tables().next().unwrap().highlighted_row, Some(0));

        for other in ["Female", "Other", "", "male", "MALE"] {
            form.patient_info.gender = other.into();
            let doc = compose_report(&form, &[], today());
            assert_eq!(
                doc.pages[3].tables().next().unwrap().highlighted_row,
                Some(1),
                "gender {other:?} must highlight the Women row"
            );
        }
    }

    #[test]
    fn cardio_rows_are_fixed() {
        let doc = compose_report(&sample_form(), &[], today());
        let table = doc.pages[3].tables().next().unwrap();
        assert_eq!(table.rows[0], ["Men", "0.30-to-0.69", "0.70-to-0.89", "0.90-to-1.2"]);
        assert_eq!(
            table.rows[1],
            ["Women", "0.30-to-0.59", "0.60-to-0.79", "0.80-to-1.00"]
        );
    }

    // ── Recommendations pages ────────────────────────────

    #[test]
    fn nutrition_rows_come_from_typed_block() {
        let mut form = sample_form();
        form.nutrition_recommendations.nutritional_plan = "Mediterranean".into();
        form.nutrition_recommendations.additional_considerations = "Limit alcohol".into();

        let doc = compose_report(&form, &[], today());
        let table = doc.pages[4].tables().next().unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0], ["Style (nutritional plan)", "Mediterranean"]);
        assert_eq!(table.rows[2], ["Omissions", ""]);
        assert_eq!(table.rows[3], ["Additional Considerations", "Limit alcohol"]);
    }

    #[test]
    fn lifestyle_page_has_exercise_and_sleep_tables() {
        let mut form = sample_form();
        form.exercise_detail.focus_on = "Zone 2 cardio".into();
        form.sleep_stress_recommendations.sleep = "8 hours".into();

        let doc = compose_report(&form, &[], today());
        let tables: Vec<_> = doc.pages[5].tables().collect();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 4);
        assert_eq!(tables[0].rows[0], ["Focus on", "Zone 2 cardio"]);
        assert_eq!(tables[1].rows.len(), 2);
        assert_eq!(tables[1].rows[0], ["Sleep", "8 hours"]);
        assert_eq!(tables[1].rows[1], ["Stress", ""]);
    }

    // ── Medications + supplements ────────────────────────

    #[test]
    fn medication_names_resolve_through_catalog() {
        let catalog = vec![catalog_entry("Amoxicillin", CatalogEntryType::Medication)];
        let mut form = sample_form();
        form.medications
            .push(medication_entry(&catalog[0].id.to_string()));

        let doc = compose_report(&form, &catalog, today());
        let table = doc.pages[6].tables().next().unwrap();
        assert_eq!(table.rows[0], ["Amoxicillin", "500mg", "Prescription"]);
    }

    #[test]
    fn unresolved_medication_reference_renders_blank_name() {
        let mut form = sample_form();
        form.medications.push(medication_entry("no-such-entry"));

        let doc = compose_report(&form, &[], today());
        let table = doc.pages[6].tables().next().unwrap();
        assert_eq!(table.rows[0][0], "");
        assert_eq!(table.rows[0][1], "500mg");
    }

    #[test]
    fn short_medication_list_pads_to_five_rows() {
        let mut form = sample_form();
        form.medications.push(medication_entry("a"));
        form.medications.push(medication_entry("b"));

        let doc = compose_report(&form, &[], today());
        let table = doc.pages[6].tables().next().unwrap();
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[1][1], "500mg");
        for blank in &table.rows[2..] {
            assert!(blank.iter().all(String::is_empty));
        }
    }

    #[test]
    fn long_medication_list_is_never_truncated() {
        let mut form = sample_form();
        for i in 0..7 {
            form.medications.push(medication_entry(&format!("ref-{i}")));
        }

        let doc = compose_report(&form, &[], today());
        let table = doc.pages[6].tables().next().unwrap();
        assert_eq!(table.rows.len(), 7);
        assert!(table.rows.iter().all(|r| !r[1].is_empty()));
    }

    #[test]
    fn empty_medication_list_substitutes_example_rows() {
        let doc = compose_report(&sample_form(), &[], today());
        let table = doc.pages[6].tables().next().unwrap();
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[0][0], "Jardiance");
        assert_eq!(table.rows[1][0], "Crestor");
        assert!(table.rows[2].iter().all(String::is_empty));
    }

    #[test]
    fn supplements_render_with_source_and_pad_to_four() {
        let catalog = vec![catalog_entry(
            "Biogena Multispektrum",
            CatalogEntryType::Supplement,
        )];
        let mut form = sample_form();
        form.supplements.push(SupplementEntry {
            id: "ps1".into(),
            supplement_id: catalog[0].id.to_string(),
            dosage: "2 capsules once daily in the morning (am)".into(),
            source: "Clinic".into(),
        });

        let doc = compose_report(&form, &catalog, today());
        let tables: Vec<_> = doc.pages[6].tables().collect();
        let supplements = tables[1];
        assert_eq!(supplements.rows.len(), 4);
        assert_eq!(
            supplements.rows[0],
            [
                "Biogena Multispektrum",
                "2 capsules once daily in the morning (am)",
                "Clinic"
            ]
        );
        assert!(supplements.rows[1].iter().all(String::is_empty));
    }

    // ── Follow-ups ───────────────────────────────────────

    #[test]
    fn follow_ups_render_and_pad_to_four() {
        let mut form = sample_form();
        form.follow_ups.push(FollowUp {
            with_doctor: "Dr Nas".into(),
            for_reason: "Follow up".into(),
            date: "23/10/2025".into(),
        });

        let doc = compose_report(&form, &[], today());
        let page = &doc.pages[7];
        let table = page.tables().next().unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0], ["Dr Nas", "Follow up", "23/10/2025"]);
        assert!(page.contains_text("Kind Regards,"));
        assert!(page.contains_text(SIGNATURE_NAME));
    }

    // ── Determinism ──────────────────────────────────────

    #[test]
    fn composition_is_deterministic() {
        let catalog = vec![catalog_entry("Metformin", CatalogEntryType::Medication)];
        let mut form = sample_form();
        form.show_insulin_resistance = true;
        form.medications
            .push(medication_entry(&catalog[0].id.to_string()));

        let first = compose_report(&form, &catalog, today());
        let second = compose_report(&form, &catalog, today());
        assert_eq!(first, second);
    }

    #[test]
    fn date_of_birth_cell_formats() {
        assert_eq!(date_of_birth_cell(""), "-");
        assert_eq!(date_of_birth_cell("1985-04-12"), "4/12/1985");
        assert_eq!(date_of_birth_cell("April 1985"), "April 1985");
    }
}
