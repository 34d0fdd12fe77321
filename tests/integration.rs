//! Integration tests for the payroll engine.
//!
//! This test suite covers the end-to-end calculation scenarios:
//! - Two full weeks with rest-day pay
//! - Sunday and holiday work
//! - Night shifts crossing midnight
//! - Piecework productivity and excess pay
//! - Concept ordering and retirement filtering
//! - Error cases and batch isolation

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use agro_payroll::batch::{EmployeeInput, run_payroll_batch};
use agro_payroll::calculation::{
    CalculationParameters, CalendarIndex, ConceptRegistry, DIAG_NO_PIECEWORK, PayrollInputs,
    compute_payroll_detail, is_sunday,
};
use agro_payroll::config::{ConfigLoader, OvertimeRates};
use agro_payroll::error::EngineError;
use agro_payroll::models::{
    AttendanceEntry, CalendarDay, ConceptCategory, ConceptConfiguration, Employee, Labor,
    LaborCatalog, PayPeriod, PayrollDetail,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A date in March 2026 (the 2nd is a Monday).
fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn employee(id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        full_name: "Rosa Quispe".to_string(),
        monthly_salary: Some(dec("3000")),
        retirement_scheme: Some("ONP".to_string()),
        health_scheme: None,
        dependents: 0,
    }
}

fn shift(employee_id: &str, day: u32, start: (u32, u32), end: (u32, u32), hours: &str) -> AttendanceEntry {
    AttendanceEntry {
        id: format!("att_{}_{}_{}", employee_id, day, start.0),
        employee_id: employee_id.to_string(),
        created_at: date(day).and_hms_opt(start.0, start.1, 0).unwrap(),
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0),
        paid_hours: Some(dec(hours)),
        productivity_count: None,
        labor_id: None,
    }
}

fn day_shift(employee_id: &str, day: u32) -> AttendanceEntry {
    shift(employee_id, day, (6, 0), (14, 0), "8")
}

/// Monday to Saturday of both weeks of the period.
fn two_full_weeks(employee_id: &str) -> Vec<AttendanceEntry> {
    (2..=7).chain(9..=14).map(|d| day_shift(employee_id, d)).collect()
}

fn calendar(holidays: &[u32]) -> CalendarIndex {
    PayPeriod::new(date(2), date(15))
        .days()
        .map(|d| {
            let holiday = holidays.contains(&chrono::Datelike::day(&d));
            CalendarDay {
                date: d,
                is_working_day: !is_sunday(d) && !holiday,
                is_holiday: holiday,
            }
        })
        .collect()
}

fn concept(code: &str, category: ConceptCategory, value: Option<&str>) -> ConceptConfiguration {
    ConceptConfiguration::new(code, category, value.map(dec))
}

fn income(code: &str) -> ConceptConfiguration {
    concept(code, ConceptCategory::Income, None)
}

fn inputs(concepts: Vec<ConceptConfiguration>, calendar: CalendarIndex, labors: LaborCatalog) -> PayrollInputs {
    PayrollInputs {
        parameters: CalculationParameters {
            period: PayPeriod::new(date(2), date(15)),
            working_days: 12,
            total_working_days: 26,
            overtime: OvertimeRates::default(),
            daily_normal_hours: dec("8"),
            month_calculation_days: 30,
        },
        calendar,
        labors,
        concepts,
    }
}

fn run(attendance: &[AttendanceEntry], inputs: &PayrollInputs) -> PayrollDetail {
    compute_payroll_detail(
        &employee("W-0001"),
        attendance,
        inputs,
        &ConceptRegistry::standard(),
    )
    .expect("calculation failed")
}

fn harvest_labor() -> LaborCatalog {
    let mut labors = LaborCatalog::new();
    labors.insert(
        "harvest".to_string(),
        Labor {
            id: "harvest".to_string(),
            name: "Blueberry harvest".to_string(),
            is_piecework: true,
            min_task_requirement: Some(25),
            base_price: Some(dec("1.50")),
        },
    );
    labors
}

fn harvest(day: u32, count: u32) -> AttendanceEntry {
    AttendanceEntry {
        productivity_count: Some(count),
        labor_id: Some("harvest".to_string()),
        ..day_shift("W-0001", day)
    }
}

// =============================================================================
// Basic salary and rest-day pay
// =============================================================================

#[test]
fn test_it_001_two_full_weeks() {
    let run_inputs = inputs(
        vec![
            income("BASIC_SALARY"),
            income("DOMINICAL"),
            concept("ONP", ConceptCategory::Retirement, Some("13")),
        ],
        calendar(&[]),
        LaborCatalog::new(),
    );
    let detail = run(&two_full_weeks("W-0001"), &run_inputs);

    assert_eq!(detail.days_worked, 12);
    assert_eq!(detail.dominical_weeks, 2);
    assert_eq!(detail.concept_amount("BASIC_SALARY"), Some(dec("1200")));
    assert_eq!(detail.concept_amount("DOMINICAL"), Some(dec("200")));
    assert_eq!(detail.concept_amount("ONP"), Some(dec("182")));
    assert_eq!(detail.total_income, dec("1400"));
    assert_eq!(detail.net_pay, dec("1218"));
    assert_eq!(detail.hours.normal, dec("96"));
    assert_eq!(detail.hours.total, dec("96"));
}

#[test]
fn test_it_002_sunday_worked() {
    let mut attendance = two_full_weeks("W-0001");
    attendance.push(day_shift("W-0001", 8));
    let run_inputs = inputs(
        vec![income("BASIC_SALARY"), income("DOMINICAL")],
        calendar(&[]),
        LaborCatalog::new(),
    );
    let detail = run(&attendance, &run_inputs);

    assert_eq!(detail.days_worked, 13);
    assert_eq!(detail.concept_amount("BASIC_SALARY"), Some(dec("1400")));
    assert_eq!(detail.concept_amount("DOMINICAL"), Some(dec("200")));
    assert_eq!(detail.hours.holiday_sunday, dec("8"));

    let sunday = detail.day_details.iter().find(|d| d.date == date(8)).unwrap();
    assert!(sunday.is_sunday);
    assert!(!sunday.is_holiday);
}

#[test]
fn test_it_003_missed_day_forfeits_week() {
    let attendance: Vec<_> = two_full_weeks("W-0001")
        .into_iter()
        .filter(|e| e.work_date() != date(11))
        .collect();
    let run_inputs = inputs(vec![income("DOMINICAL")], calendar(&[]), LaborCatalog::new());
    let detail = run(&attendance, &run_inputs);

    assert_eq!(detail.dominical_weeks, 1);
    assert_eq!(detail.concept_amount("DOMINICAL"), Some(dec("100")));
}

#[test]
fn test_it_004_holiday() {
    let attendance: Vec<_> = (2..=7)
        .filter(|d| *d != 4)
        .map(|d| day_shift("W-0001", d))
        .chain(std::iter::once(shift("W-0001", 4, (6, 0), (16, 0), "10")))
        .collect();
    let run_inputs = inputs(
        vec![income("BASIC_SALARY"), income("DOMINICAL"), income("HOLIDAY_OVERTIME")],
        calendar(&[4]),
        LaborCatalog::new(),
    );
    let detail = run(&attendance, &run_inputs);

    // 5 ordinary days + holiday at double
    assert_eq!(detail.concept_amount("BASIC_SALARY"), Some(dec("700")));
    assert_eq!(detail.concept_amount("DOMINICAL"), Some(dec("100")));
    assert_eq!(detail.hours.holiday_sunday, dec("10"));
    assert_eq!(detail.hours.holiday_sunday_extra, dec("2"));
    // 2 h × 12.5 × 2
    assert_eq!(detail.concept_amount("HOLIDAY_OVERTIME"), Some(dec("50")));
}

#[test]
fn test_it_016_week_straddling_two_periods_paid_once() {
    // Monday 30 March to Saturday 4 April 2026
    let worked: Vec<AttendanceEntry> = [date(30), date(31)]
        .into_iter()
        .chain((1..=4).map(|d| NaiveDate::from_ymd_opt(2026, 4, d).unwrap()))
        .map(|d| AttendanceEntry {
            id: format!("att_{}", d),
            created_at: d.and_hms_opt(6, 0, 0).unwrap(),
            ..day_shift("W-0001", 2)
        })
        .collect();
    let period_inputs = |start: NaiveDate, end: NaiveDate| {
        let mut run_inputs = inputs(
            vec![income("BASIC_SALARY"), income("DOMINICAL")],
            CalendarIndex::default(),
            LaborCatalog::new(),
        );
        run_inputs.parameters.period = PayPeriod::new(start, end);
        run_inputs
    };

    let march = run(&worked, &period_inputs(date(16), date(31)));
    let april = run(
        &worked,
        &period_inputs(
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
        ),
    );

    assert!(march.dominical_weeks + april.dominical_weeks <= 1);
    assert_eq!(march.concept_amount("DOMINICAL"), Some(Decimal::ZERO));
    assert_eq!(april.concept_amount("DOMINICAL"), Some(dec("100")));
    assert_eq!(march.days_worked, 2);
    assert_eq!(april.days_worked, 4);
}

// =============================================================================
// Hours
// =============================================================================

#[test]
fn test_it_005_overtime_tiers() {
    let run_inputs = inputs(
        vec![income("OVERTIME_25"), income("OVERTIME_35")],
        calendar(&[]),
        LaborCatalog::new(),
    );
    let detail = run(&[shift("W-0001", 3, (6, 0), (18, 0), "12")], &run_inputs);

    assert_eq!(detail.hours.normal, dec("8"));
    assert_eq!(detail.hours.overtime_tier1, dec("2"));
    assert_eq!(detail.hours.overtime_tier2, dec("2"));
    // 2 × 12.5 × 1.25 and 2 × 12.5 × 1.35
    assert_eq!(detail.concept_amount("OVERTIME_25"), Some(dec("31.25")));
    assert_eq!(detail.concept_amount("OVERTIME_35"), Some(dec("33.75")));
}

#[test]
fn test_it_006_night_shift() {
    let run_inputs = inputs(vec![income("NIGHT_SURCHARGE")], calendar(&[]), LaborCatalog::new());
    let detail = run(&[shift("W-0001", 3, (20, 0), (2, 0), "6")], &run_inputs);

    assert_eq!(detail.hours.night, dec("4"));
    assert_eq!(detail.day_details[0].date, date(3));
    assert_eq!(detail.day_details[0].night_hours, dec("4"));
    // 4 × 12.5 × 35%
    assert_eq!(detail.concept_amount("NIGHT_SURCHARGE"), Some(dec("17.5")));
}

// =============================================================================
// Piecework
// =============================================================================

#[test]
fn test_it_007_piecework_excess() {
    let run_inputs = inputs(
        vec![income("PIECEWORK_EXCESS"), concept("PRODUCTIVITY_BONUS", ConceptCategory::Income, Some("50"))],
        calendar(&[]),
        harvest_labor(),
    );
    let detail = run(&[harvest(2, 30)], &run_inputs);

    assert_eq!(detail.day_details[0].productivity_percent, Some(dec("120")));
    assert_eq!(detail.concept_amount("PIECEWORK_EXCESS"), Some(dec("7.50")));
    assert_eq!(detail.productivity_score, Some(dec("100")));
    assert_eq!(detail.concept_amount("PRODUCTIVITY_BONUS"), Some(dec("50")));
}

#[test]
fn test_it_008_shortfall_zeroes_score() {
    let run_inputs = inputs(
        vec![concept("PRODUCTIVITY_BONUS", ConceptCategory::Income, Some("50"))],
        calendar(&[]),
        harvest_labor(),
    );
    let detail = run(&[harvest(2, 30), harvest(3, 20)], &run_inputs);

    assert_eq!(detail.productivity_score, Some(Decimal::ZERO));
    assert_eq!(detail.concept_amount("PRODUCTIVITY_BONUS"), Some(Decimal::ZERO));
}

#[test]
fn test_it_009_no_piecework_null_score() {
    let run_inputs = inputs(
        vec![concept("PRODUCTIVITY_BONUS", ConceptCategory::Income, Some("50"))],
        calendar(&[]),
        harvest_labor(),
    );
    let detail = run(&[day_shift("W-0001", 2)], &run_inputs);

    assert_eq!(detail.productivity_score, None);
    assert!(
        detail
            .audit_trace
            .diagnostics
            .iter()
            .any(|d| d.code == DIAG_NO_PIECEWORK)
    );
}

// =============================================================================
// Concept pipeline
// =============================================================================

#[test]
fn test_it_010_order_dependence() {
    let attendance = two_full_weeks("W-0001");

    let tax_last = inputs(
        vec![
            income("BASIC_SALARY"),
            income("DOMINICAL"),
            concept("INCOME_TAX", ConceptCategory::Deduction, Some("10")),
        ],
        calendar(&[]),
        LaborCatalog::new(),
    );
    let tax_between = inputs(
        vec![
            income("BASIC_SALARY"),
            concept("INCOME_TAX", ConceptCategory::Deduction, Some("10")),
            income("DOMINICAL"),
        ],
        calendar(&[]),
        LaborCatalog::new(),
    );

    let last = run(&attendance, &tax_last);
    let between = run(&attendance, &tax_between);

    assert_eq!(last.concept_amount("INCOME_TAX"), Some(dec("140")));
    assert_eq!(between.concept_amount("INCOME_TAX"), Some(dec("120")));
    assert_eq!(last.total_income, between.total_income);
}

#[test]
fn test_it_011_retirement_filter() {
    let run_inputs = inputs(
        vec![
            income("BASIC_SALARY"),
            concept("AFP_INTEGRA", ConceptCategory::Retirement, Some("11.37")),
            concept("ONP", ConceptCategory::Retirement, Some("13")),
            concept("ESSALUD", ConceptCategory::EmployerContribution, Some("9")),
        ],
        calendar(&[]),
        LaborCatalog::new(),
    );
    let detail = run(&two_full_weeks("W-0001"), &run_inputs);

    let codes: Vec<&str> = detail.concepts.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["BASIC_SALARY", "ONP", "ESSALUD"]);
    assert_eq!(detail.concept_amount("ESSALUD"), Some(dec("108")));
    // employer contributions are not netted against pay
    assert_eq!(detail.net_pay, dec("1044"));
    assert_eq!(detail.audit_trace.steps.len(), 3);
}

#[test]
fn test_it_012_default_configuration() {
    let loader = ConfigLoader::load("./config/default").expect("Failed to load config");
    let parameters = loader.parameters(date(2), date(15), 12, 26).unwrap();
    let run_inputs = loader.payroll_inputs(parameters, calendar(&[]), LaborCatalog::new());

    let mut worker = employee("W-0001");
    worker.retirement_scheme = Some("AFP_PRIMA".to_string());
    worker.dependents = 1;

    let detail = compute_payroll_detail(
        &worker,
        &two_full_weeks("W-0001"),
        &run_inputs,
        &ConceptRegistry::standard(),
    )
    .unwrap();

    assert!(detail.concept_amount("AFP_PRIMA").is_some());
    assert!(detail.concept_amount("ONP").is_none());
    assert!(detail.concept_amount("FAMILY_ALLOWANCE").unwrap() > Decimal::ZERO);
    assert_eq!(
        detail.net_pay,
        detail.total_income - detail.total_deductions
    );

    let json = detail.day_details_json().unwrap();
    assert!(json.contains("2026-03-02"));
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_it_013_foreign_attendance() {
    let run_inputs = inputs(vec![income("BASIC_SALARY")], calendar(&[]), LaborCatalog::new());
    let result = compute_payroll_detail(
        &employee("W-0001"),
        &[day_shift("W-0002", 2)],
        &run_inputs,
        &ConceptRegistry::standard(),
    );

    match result {
        Err(EngineError::InvalidAttendance { employee_id, .. }) => assert_eq!(employee_id, "W-0001"),
        other => panic!("Expected InvalidAttendance, got {:?}", other),
    }
}

#[test]
fn test_it_014_missing_salary_degrades() {
    let run_inputs = inputs(vec![income("BASIC_SALARY"), income("DOMINICAL")], calendar(&[]), LaborCatalog::new());
    let mut worker = employee("W-0001");
    worker.monthly_salary = None;

    let detail = compute_payroll_detail(
        &worker,
        &two_full_weeks("W-0001"),
        &run_inputs,
        &ConceptRegistry::standard(),
    )
    .unwrap();

    assert_eq!(detail.total_income, Decimal::ZERO);
    assert_eq!(detail.days_worked, 12);
    assert_eq!(detail.audit_trace.diagnostics.len(), 2);
}

// =============================================================================
// Batch
// =============================================================================

#[tokio::test]
async fn test_it_015_batch_isolates_failures() {
    let run_inputs = Arc::new(inputs(
        vec![income("BASIC_SALARY"), income("DOMINICAL")],
        calendar(&[]),
        LaborCatalog::new(),
    ));

    let batch = vec![
        EmployeeInput {
            employee: employee("W-0001"),
            attendance: two_full_weeks("W-0001"),
        },
        EmployeeInput {
            employee: employee("W-0002"),
            attendance: vec![day_shift("W-0003", 2)],
        },
        EmployeeInput {
            employee: employee("W-0003"),
            attendance: vec![day_shift("W-0003", 2)],
        },
    ];

    let report = run_payroll_batch(batch, run_inputs, Arc::new(ConceptRegistry::standard()), 2)
        .await
        .unwrap();

    assert_eq!(report.details.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].employee_id, "W-0002");
    assert_eq!(report.total_net_pay, dec("1500"));
    assert_eq!(
        report.detail_for("W-0003").unwrap().concept_amount("BASIC_SALARY"),
        Some(dec("100"))
    );
}
