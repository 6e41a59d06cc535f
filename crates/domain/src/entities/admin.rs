//! Admin statistics and their table/chart shaping
//!
//! The backend returns aggregate counts in several ad-hoc shapes. This module
//! turns them into uniform [`ChartSlice`] lists and flat table rows.

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::profile::UserAccount;

/// Placeholder shown in table cells without a value
pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPreferenceCount {
    pub veg_food_count: u64,
    pub nonveg_food_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderCount {
    pub male_count: u64,
    pub female_count: u64,
    pub pref_not_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradYearCount {
    pub grad_year_count: Vec<GradYearBucket>,
}

/// One `groupBy` bucket as emitted by the backend ORM
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradYearBucket {
    pub graduation_year: Option<i32>,
    #[serde(rename = "_count")]
    pub count: GradYearTally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradYearTally {
    pub graduation_year: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseCount {
    pub course: String,
    pub count: u64,
}

/// Colour slot of a donut chart segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartColor {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl ChartColor {
    pub const fn css(self) -> &'static str {
        match self {
            Self::One => "hsl(var(--chart-1))",
            Self::Two => "hsl(var(--chart-2))",
            Self::Three => "hsl(var(--chart-3))",
            Self::Four => "hsl(var(--chart-4))",
            Self::Five => "hsl(var(--chart-5))",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub category: String,
    pub count: u64,
    pub fill: ChartColor,
}

impl ChartSlice {
    fn new(category: impl Into<String>, count: u64, fill: ChartColor) -> Self {
        Self {
            category: category.into(),
            count,
            fill,
        }
    }
}

/// Rows that can be printed by a generic table
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// A captioned table ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows<R: TableRow>(caption: Option<&str>, rows: &[R]) -> Self {
        Self {
            caption: caption.map(ToString::to_string),
            headers: R::headers().iter().map(ToString::to_string).collect(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    /// Two-column category/count table for a chart
    pub fn from_slices(caption: Option<&str>, category_header: &str, slices: &[ChartSlice]) -> Self {
        Self {
            caption: caption.map(ToString::to_string),
            headers: vec![category_header.to_string(), "Count".to_string()],
            rows: slices
                .iter()
                .map(|s| vec![s.category.clone(), s.count.to_string()])
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(EMPTY_CELL)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlumniRow {
    pub name: Option<String>,
    pub email: String,
    pub role: Option<String>,
    pub graduation_year: Option<i32>,
    pub gender: Option<String>,
    pub roll_number: Option<String>,
    pub phone_number: Option<String>,
    pub designation: Option<String>,
    pub address: Option<String>,
    pub course: Option<String>,
    pub food_preference: Option<String>,
}

impl From<&UserAccount> for AlumniRow {
    fn from(user: &UserAccount) -> Self {
        let profile = user.profile.clone().unwrap_or_default();
        Self {
            name: Some(profile.name).filter(|n| !n.is_empty()),
            email: user.email.clone(),
            role: user.role.clone(),
            graduation_year: profile.graduation_year,
            gender: profile.gender,
            roll_number: profile.roll_number,
            phone_number: profile.phone_number,
            designation: profile.designation,
            address: profile.address,
            course: profile.course,
            food_preference: user.food_preference.clone(),
        }
    }
}

impl TableRow for AlumniRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Name",
            "Email",
            "Role",
            "Graduation Year",
            "Gender",
            "Roll Number",
            "Phone Number",
            "Designation",
            "Address",
            "Course",
            "Food Preference",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            cell(self.name.as_deref()),
            self.email.clone(),
            cell(self.role.as_deref()),
            self.graduation_year
                .map_or_else(|| EMPTY_CELL.to_string(), |y| y.to_string()),
            cell(self.gender.as_deref()),
            cell(self.roll_number.as_deref()),
            cell(self.phone_number.as_deref()),
            cell(self.designation.as_deref()),
            cell(self.address.as_deref()),
            cell(self.course.as_deref()),
            cell(self.food_preference.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub event_name: String,
    pub about: String,
    /// Creation date, `YYYY-MM-DD`
    pub created_at: Option<String>,
    /// Comma-separated participant names, or `None` when nobody joined
    pub participants: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        let names: Vec<&str> = event
            .user_activities
            .iter()
            .filter_map(|a| a.user.as_ref())
            .map(super::event::Participant::display_name)
            .collect();

        Self {
            event_name: event.event_name.clone(),
            about: event.about.clone(),
            created_at: event
                .created_at
                .map(|t| t.date_naive().format("%Y-%m-%d").to_string()),
            participants: if names.is_empty() {
                "None".to_string()
            } else {
                names.join(", ")
            },
        }
    }
}

impl TableRow for EventRow {
    fn headers() -> &'static [&'static str] {
        &["Event Name", "Description", "Created At", "Participants"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.event_name.clone(),
            cell(Some(self.about.as_str())),
            cell(self.created_at.as_deref()),
            self.participants.clone(),
        ]
    }
}

/// Everything the admin endpoints returned, unshaped
#[derive(Debug, Clone, Default)]
pub struct AdminSnapshot {
    pub food: FoodPreferenceCount,
    pub gender: GenderCount,
    pub graduation_years: GradYearCount,
    pub courses: Vec<CourseCount>,
    pub alumni: Vec<UserAccount>,
    pub events: Vec<Event>,
}

/// Admin dashboard contents, ready for tables and donut charts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    pub alumni: Vec<AlumniRow>,
    pub courses: Vec<ChartSlice>,
    pub events: Vec<EventRow>,
    pub food: Vec<ChartSlice>,
    pub gender: Vec<ChartSlice>,
    pub graduation_years: Vec<ChartSlice>,
}

impl AdminDashboard {
    pub fn build(snapshot: &AdminSnapshot) -> Self {
        let food = vec![
            ChartSlice::new("Vegetarian", snapshot.food.veg_food_count, ChartColor::One),
            ChartSlice::new("Non-Vegetarian", snapshot.food.nonveg_food_count, ChartColor::Two),
        ];

        let gender = vec![
            ChartSlice::new("Male", snapshot.gender.male_count, ChartColor::One),
            ChartSlice::new("Female", snapshot.gender.female_count, ChartColor::Two),
            ChartSlice::new("Prefer Not to Say", snapshot.gender.pref_not_count, ChartColor::Three),
        ];

        let graduation_years = snapshot
            .graduation_years
            .grad_year_count
            .iter()
            .map(|bucket| {
                let category = bucket
                    .graduation_year
                    .map_or_else(|| "Not Specified".to_string(), |y| y.to_string());
                ChartSlice::new(category, bucket.count.graduation_year, ChartColor::Four)
            })
            .collect();

        let courses = snapshot
            .courses
            .iter()
            .map(|c| ChartSlice::new(c.course.clone(), c.count, ChartColor::Five))
            .collect();

        Self {
            alumni: snapshot.alumni.iter().map(AlumniRow::from).collect(),
            courses,
            events: snapshot.events.iter().map(EventRow::from).collect(),
            food,
            gender,
            graduation_years,
        }
    }

    pub fn total_alumni(&self) -> usize {
        self.alumni.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> AdminSnapshot {
        let graduation_years: GradYearCount = serde_json::from_str(
            r#"{ "gradYearCount": [
                { "graduationYear": 2019, "_count": { "graduationYear": 12 } },
                { "graduationYear": null, "_count": { "graduationYear": 3 } }
            ] }"#,
        )
        .unwrap();

        let events: Vec<Event> = serde_json::from_str(
            r#"[
                { "id": "e1", "eventName": "Reunion", "about": "Annual meetup",
                  "createdAt": "2025-01-15T10:30:00Z",
                  "userActivities": [
                    { "id": "u1", "user": { "email": "a@b.co", "profile": { "name": "Asha" } } },
                    { "id": "u2", "user": { "email": "r@b.co", "profile": { "name": "Ravi" } } }
                  ] },
                { "id": "e2", "eventName": "Quiz", "about": "" }
            ]"#,
        )
        .unwrap();

        let alumni: Vec<UserAccount> = serde_json::from_str(
            r#"[{ "email": "a@b.co", "role": "USER", "foodPreference": "VEG",
                  "profile": { "name": "Asha", "graduationYear": 2019, "phoneNumber": "9876543210" } }]"#,
        )
        .unwrap();

        AdminSnapshot {
            food: serde_json::from_str(r#"{ "vegFoodCount": 7, "nonvegFoodCount": 4 }"#).unwrap(),
            gender: serde_json::from_str(r#"{ "maleCount": 5, "femaleCount": 5, "prefNotCount": 1 }"#)
                .unwrap(),
            graduation_years,
            courses: serde_json::from_str(r#"[{ "course": "DATA_SCIENCE", "count": 6 }]"#).unwrap(),
            alumni,
            events,
        }
    }

    #[test]
    fn counts_become_chart_slices() {
        let dashboard = AdminDashboard::build(&snapshot());
        assert_eq!(dashboard.food[0].category, "Vegetarian");
        assert_eq!(dashboard.food[0].count, 7);
        assert_eq!(dashboard.food[1].count, 4);
        assert_eq!(dashboard.gender[2].category, "Prefer Not to Say");
        assert_eq!(dashboard.gender[2].count, 1);
        assert_eq!(dashboard.courses[0].category, "DATA_SCIENCE");
        assert_eq!(dashboard.courses[0].fill, ChartColor::Five);
    }

    #[test]
    fn missing_graduation_year_is_not_specified() {
        let dashboard = AdminDashboard::build(&snapshot());
        let categories: Vec<_> = dashboard
            .graduation_years
            .iter()
            .map(|s| (s.category.as_str(), s.count))
            .collect();
        assert_eq!(categories, vec![("2019", 12), ("Not Specified", 3)]);
    }

    #[test]
    fn event_rows_list_participants_or_none() {
        let dashboard = AdminDashboard::build(&snapshot());
        assert_eq!(dashboard.events[0].participants, "Asha, Ravi");
        assert_eq!(dashboard.events[0].created_at.as_deref(), Some("2025-01-15"));
        assert_eq!(dashboard.events[1].participants, "None");
        assert_eq!(dashboard.events[1].cells()[1], EMPTY_CELL);
    }

    #[test]
    fn alumni_table_fills_missing_cells() {
        let dashboard = AdminDashboard::build(&snapshot());
        let table = Table::from_rows(Some("List of all alumni."), &dashboard.alumni);
        assert_eq!(table.headers.len(), 11);
        let row = &table.rows[0];
        assert_eq!(row[0], "Asha");
        assert_eq!(row[3], "2019");
        assert_eq!(row[4], EMPTY_CELL);
        assert_eq!(row[10], "VEG");
    }

    #[test]
    fn empty_snapshot_yields_zero_slices_and_empty_tables() {
        let dashboard = AdminDashboard::build(&AdminSnapshot::default());
        assert!(dashboard.food.iter().all(|s| s.count == 0));
        assert!(dashboard.graduation_years.is_empty());
        assert!(Table::from_rows(None, &dashboard.events).is_empty());
        assert_eq!(dashboard.total_alumni(), 0);
    }

    #[test]
    fn slices_table_has_count_column() {
        let dashboard = AdminDashboard::build(&snapshot());
        let table = Table::from_slices(None, "Food", &dashboard.food);
        assert_eq!(table.headers, vec!["Food", "Count"]);
        assert_eq!(table.rows[1], vec!["Non-Vegetarian", "4"]);
    }
}
