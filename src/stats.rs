//! Attendance aggregation.
//!
//! Pure functions over the in-memory (employees, attendance) snapshot. Every
//! derived view is recomputed from scratch on each call; nothing is cached
//! between invocations. Recomputation is O(employees x records), which is fine
//! for the intended scale (hundreds of rows, not millions).

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;

/// Per-employee attendance totals.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeStat {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 18)]
    pub present: u32,
    #[schema(example = 2)]
    pub absent: u32,
    #[schema(example = 20)]
    pub total: u32,
    /// Rounded percentage of present days; 0 when no days are recorded.
    #[schema(example = 90)]
    pub rate: u32,
}

/// Employee count for one department value.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentStat {
    #[schema(example = "Engineering")]
    pub name: String,
    #[schema(example = 4)]
    pub count: u32,
}

/// One calendar day's records, in the order they were marked.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyAttendance {
    #[schema(example = "2026-02-04", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 5)]
    pub present: u32,
    #[schema(example = 1)]
    pub absent: u32,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodaySummary {
    #[schema(example = 5)]
    pub present_today: u32,
    #[schema(example = 1)]
    pub absent_today: u32,
}

/// Single-employee drill-down totals.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 18)]
    pub present_days: u32,
    #[schema(example = 2)]
    pub absent_days: u32,
    #[schema(example = 90)]
    pub rate: u32,
}

/// Rounded present-percentage. Defined as 0 for an empty history.
fn attendance_rate(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((present as f64 / total as f64) * 100.0).round() as u32
}

/// One stat row per input employee, sorted by rate, best first. The sort is
/// stable: employees with equal rates keep their input order. Records whose
/// `employee_id` matches no employee are ignored here.
pub fn per_employee_stats(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
) -> Vec<EmployeeStat> {
    let mut stats: Vec<EmployeeStat> = employees
        .iter()
        .map(|emp| {
            let mut present = 0u32;
            let mut absent = 0u32;
            for record in attendance {
                if record.employee_id != emp.employee_id {
                    continue;
                }
                match record.status {
                    AttendanceStatus::Present => present += 1,
                    AttendanceStatus::Absent => absent += 1,
                }
            }
            let total = present + absent;
            EmployeeStat {
                employee_id: emp.employee_id.clone(),
                full_name: emp.full_name.clone(),
                department: emp.department.clone(),
                present,
                absent,
                total,
                rate: attendance_rate(present, total),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.rate.cmp(&a.rate));
    stats
}

/// Employee counts per distinct department value, in first-seen order.
/// Counts sum to the employee total by construction.
pub fn department_distribution(employees: &[Employee]) -> Vec<DepartmentStat> {
    let mut stats: Vec<DepartmentStat> = Vec::new();
    for emp in employees {
        match stats.iter_mut().find(|s| s.name == emp.department) {
            Some(stat) => stat.count += 1,
            None => stats.push(DepartmentStat {
                name: emp.department.clone(),
                count: 1,
            }),
        }
    }
    stats
}

/// Partitions records into per-day buckets, most recent day first. Within a
/// bucket, records keep their input order. Every record lands in exactly one
/// bucket.
pub fn group_by_date(attendance: &[AttendanceRecord]) -> Vec<DailyAttendance> {
    let mut days: Vec<DailyAttendance> = Vec::new();
    for record in attendance {
        let idx = match days.iter().position(|d| d.date == record.date) {
            Some(idx) => idx,
            None => {
                days.push(DailyAttendance {
                    date: record.date,
                    present: 0,
                    absent: 0,
                    records: Vec::new(),
                });
                days.len() - 1
            }
        };
        let day = &mut days[idx];
        match record.status {
            AttendanceStatus::Present => day.present += 1,
            AttendanceStatus::Absent => day.absent += 1,
        }
        day.records.push(record.clone());
    }

    days.sort_by(|a, b| b.date.cmp(&a.date));
    days
}

/// Distinct record dates, most recent first. Used for date filter selectors.
pub fn distinct_dates(attendance: &[AttendanceRecord]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for record in attendance {
        if !dates.contains(&record.date) {
            dates.push(record.date);
        }
    }
    dates.sort_by(|a, b| b.cmp(a));
    dates
}

/// Flat record list sorted by calendar date, most recent first. The sort is
/// stable, so same-day records keep their input order.
pub fn sorted_by_date_desc(attendance: &[AttendanceRecord]) -> Vec<AttendanceRecord> {
    let mut records = attendance.to_vec();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Present/Absent counts among records dated exactly `today`. The caller
/// computes `today` once per refresh, not per record.
pub fn today_summary(attendance: &[AttendanceRecord], today: NaiveDate) -> TodaySummary {
    let mut summary = TodaySummary {
        present_today: 0,
        absent_today: 0,
    };
    for record in attendance.iter().filter(|r| r.date == today) {
        match record.status {
            AttendanceStatus::Present => summary.present_today += 1,
            AttendanceStatus::Absent => summary.absent_today += 1,
        }
    }
    summary
}

/// Totals for one employee's (pre-filtered) history.
pub fn attendance_summary(records: &[AttendanceRecord]) -> AttendanceSummary {
    let present_days = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as u32;
    let absent_days = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Absent)
        .count() as u32;
    AttendanceSummary {
        present_days,
        absent_days,
        rate: attendance_rate(present_days, present_days + absent_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(employee_id: &str, full_name: &str, department: &str) -> Employee {
        Employee {
            id: format!("row-{employee_id}"),
            employee_id: employee_id.to_string(),
            full_name: full_name.to_string(),
            email: format!("{}@example.com", employee_id.to_lowercase()),
            department: department.to_string(),
            created_at: day("2026-01-01").and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    fn record(employee_id: &str, name: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("rec-{employee_id}-{date}"),
            employee_id: employee_id.to_string(),
            employee_name: name.to_string(),
            date: day(date),
            status,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    use AttendanceStatus::{Absent, Present};

    #[test]
    fn test_per_employee_stats_counts_and_rate() {
        let employees = vec![employee("E1", "Ann", "Engineering")];
        let attendance = vec![
            record("E1", "Ann", "2024-01-01", Present),
            record("E1", "Ann", "2024-01-02", Absent),
        ];

        let stats = per_employee_stats(&employees, &attendance);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].present, 1);
        assert_eq!(stats[0].absent, 1);
        assert_eq!(stats[0].total, 2);
        assert_eq!(stats[0].rate, 50);
    }

    #[test]
    fn test_per_employee_stats_zero_records_has_zero_rate() {
        let employees = vec![employee("E1", "Ann", "Engineering")];

        let stats = per_employee_stats(&employees, &[]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total, 0);
        assert_eq!(stats[0].rate, 0);
    }

    #[test]
    fn test_per_employee_stats_sorted_by_rate_descending() {
        let employees = vec![
            employee("E1", "Ann", "Engineering"),
            employee("E2", "Bob", "Sales"),
            employee("E3", "Cay", "Finance"),
        ];
        // E1: 1/2 = 50%, E2: 1/1 = 100%, E3: 0/1 = 0%
        let attendance = vec![
            record("E1", "Ann", "2024-01-01", Present),
            record("E1", "Ann", "2024-01-02", Absent),
            record("E2", "Bob", "2024-01-01", Present),
            record("E3", "Cay", "2024-01-01", Absent),
        ];

        let stats = per_employee_stats(&employees, &attendance);
        let ids: Vec<&str> = stats.iter().map(|s| s.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E1", "E3"]);
    }

    #[test]
    fn test_per_employee_stats_equal_rates_keep_input_order() {
        let employees = vec![
            employee("E1", "Ann", "Engineering"),
            employee("E2", "Bob", "Sales"),
            employee("E3", "Cay", "Finance"),
            employee("E4", "Dee", "Marketing"),
        ];
        // Everyone at 100%; E4 ahead of the pack with nothing recorded (0%).
        let attendance = vec![
            record("E1", "Ann", "2024-01-01", Present),
            record("E2", "Bob", "2024-01-01", Present),
            record("E3", "Cay", "2024-01-01", Present),
        ];

        let stats = per_employee_stats(&employees, &attendance);
        let ids: Vec<&str> = stats.iter().map(|s| s.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3", "E4"]);
    }

    #[test]
    fn test_per_employee_stats_ignores_unknown_employee_ids() {
        let employees = vec![employee("E1", "Ann", "Engineering")];
        let attendance = vec![
            record("E1", "Ann", "2024-01-01", Present),
            // Marked before the employee was deleted; no matching row now.
            record("GONE", "Old Name", "2024-01-01", Absent),
        ];

        let stats = per_employee_stats(&employees, &attendance);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].present, 1);
        assert_eq!(stats[0].absent, 0);
    }

    #[test]
    fn test_rate_rounding() {
        assert_eq!(attendance_rate(0, 0), 0);
        assert_eq!(attendance_rate(1, 2), 50);
        assert_eq!(attendance_rate(1, 3), 33);
        assert_eq!(attendance_rate(2, 3), 67);
        assert_eq!(attendance_rate(3, 3), 100);
    }

    #[test]
    fn test_department_distribution_counts_sum_to_employee_total() {
        let employees = vec![
            employee("E1", "Ann", "Engineering"),
            employee("E2", "Bob", "Sales"),
            employee("E3", "Cay", "Engineering"),
            employee("E4", "Dee", "Finance"),
            employee("E5", "Eve", "Sales"),
        ];

        let stats = department_distribution(&employees);
        let sum: u32 = stats.iter().map(|s| s.count).sum();
        assert_eq!(sum as usize, employees.len());
    }

    #[test]
    fn test_department_distribution_first_seen_order() {
        let employees = vec![
            employee("E1", "Ann", "Sales"),
            employee("E2", "Bob", "Engineering"),
            employee("E3", "Cay", "Sales"),
            employee("E4", "Dee", "Finance"),
        ];

        let stats = department_distribution(&employees);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", "Engineering", "Finance"]);
        assert_eq!(stats[0].count, 2);
    }

    #[test]
    fn test_department_distribution_tolerates_arbitrary_values() {
        let employees = vec![
            employee("E1", "Ann", "Skunkworks"),
            employee("E2", "Bob", ""),
        ];

        let stats = department_distribution(&employees);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Skunkworks");
        assert_eq!(stats[1].name, "");
    }

    #[test]
    fn test_department_distribution_empty_input() {
        assert!(department_distribution(&[]).is_empty());
    }

    #[test]
    fn test_group_by_date_partitions_without_loss_or_duplication() {
        let attendance = vec![
            record("E1", "Ann", "2024-03-01", Present),
            record("E2", "Bob", "2024-02-28", Absent),
            record("E3", "Cay", "2024-03-01", Present),
            record("E1", "Ann", "2024-02-28", Present),
        ];

        let days = group_by_date(&attendance);
        let bucketed: usize = days.iter().map(|d| d.records.len()).sum();
        assert_eq!(bucketed, attendance.len());
        for record in &attendance {
            let holders = days
                .iter()
                .filter(|d| d.records.iter().any(|r| r.id == record.id))
                .count();
            assert_eq!(holders, 1, "record {} must sit in exactly one bucket", record.id);
        }
    }

    #[test]
    fn test_group_by_date_same_day_records_share_one_bucket_in_input_order() {
        let attendance = vec![
            record("E1", "Ann", "2024-03-01", Present),
            record("E2", "Bob", "2024-03-01", Absent),
        ];

        let days = group_by_date(&attendance);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, day("2024-03-01"));
        assert_eq!(days[0].records[0].employee_id, "E1");
        assert_eq!(days[0].records[1].employee_id, "E2");
        assert_eq!(days[0].present, 1);
        assert_eq!(days[0].absent, 1);
    }

    #[test]
    fn test_group_by_date_most_recent_day_first() {
        let attendance = vec![
            record("E1", "Ann", "2024-01-02", Present),
            record("E1", "Ann", "2024-01-05", Present),
            record("E1", "Ann", "2024-01-03", Absent),
        ];

        let days = group_by_date(&attendance);
        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day("2024-01-05"), day("2024-01-03"), day("2024-01-02")]);
    }

    #[test]
    fn test_descending_order_crosses_year_boundary() {
        let attendance = vec![
            record("E1", "Ann", "2024-12-31", Present),
            record("E2", "Bob", "2025-01-01", Present),
        ];

        let days = group_by_date(&attendance);
        assert_eq!(days[0].date, day("2025-01-01"));
        assert_eq!(days[1].date, day("2024-12-31"));

        let flat = sorted_by_date_desc(&attendance);
        assert_eq!(flat[0].date, day("2025-01-01"));
        assert_eq!(flat[1].date, day("2024-12-31"));

        assert_eq!(
            distinct_dates(&attendance),
            vec![day("2025-01-01"), day("2024-12-31")]
        );
    }

    #[test]
    fn test_distinct_dates_dedups() {
        let attendance = vec![
            record("E1", "Ann", "2024-01-02", Present),
            record("E2", "Bob", "2024-01-02", Absent),
            record("E1", "Ann", "2024-01-01", Present),
        ];

        assert_eq!(
            distinct_dates(&attendance),
            vec![day("2024-01-02"), day("2024-01-01")]
        );
    }

    #[test]
    fn test_sorted_by_date_desc_keeps_input_order_within_a_day() {
        let attendance = vec![
            record("E1", "Ann", "2024-01-02", Present),
            record("E2", "Bob", "2024-01-02", Absent),
            record("E3", "Cay", "2024-01-03", Present),
        ];

        let flat = sorted_by_date_desc(&attendance);
        assert_eq!(flat[0].employee_id, "E3");
        assert_eq!(flat[1].employee_id, "E1");
        assert_eq!(flat[2].employee_id, "E2");
    }

    #[test]
    fn test_today_summary_counts_only_today() {
        let today = day("2026-02-04");
        let attendance = vec![
            record("E1", "Ann", "2026-02-04", Present),
            record("E2", "Bob", "2026-02-04", Absent),
            record("E3", "Cay", "2026-02-04", Present),
            record("E1", "Ann", "2026-02-03", Absent),
        ];

        let summary = today_summary(&attendance, today);
        assert_eq!(summary.present_today, 2);
        assert_eq!(summary.absent_today, 1);
    }

    #[test]
    fn test_today_summary_empty_attendance_is_all_zeros() {
        let summary = today_summary(&[], day("2026-02-04"));
        assert_eq!(summary.present_today, 0);
        assert_eq!(summary.absent_today, 0);
    }

    #[test]
    fn test_attendance_summary_single_employee() {
        let records = vec![
            record("E1", "Ann", "2024-01-01", Present),
            record("E1", "Ann", "2024-01-02", Present),
            record("E1", "Ann", "2024-01-03", Absent),
        ];

        let summary = attendance_summary(&records);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.rate, 67);
    }

    #[test]
    fn test_attendance_summary_empty_history() {
        let summary = attendance_summary(&[]);
        assert_eq!(summary.present_days, 0);
        assert_eq!(summary.absent_days, 0);
        assert_eq!(summary.rate, 0);
    }

    #[test]
    fn test_duplicate_markings_for_same_day_all_count() {
        // No uniqueness is enforced on (employee, date); every marking counts.
        let employees = vec![employee("E1", "Ann", "Engineering")];
        let attendance = vec![
            record("E1", "Ann", "2024-01-01", Present),
            record("E1", "Ann", "2024-01-01", Present),
            record("E1", "Ann", "2024-01-01", Absent),
        ];

        let stats = per_employee_stats(&employees, &attendance);
        assert_eq!(stats[0].present, 2);
        assert_eq!(stats[0].absent, 1);
        assert_eq!(stats[0].total, 3);

        let days = group_by_date(&attendance);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].records.len(), 3);
    }

    #[test]
    fn test_orphaned_records_still_appear_in_grouped_views() {
        let attendance = vec![record("GONE", "Old Name", "2024-01-01", Present)];

        let days = group_by_date(&attendance);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].records[0].employee_name, "Old Name");
    }
}
