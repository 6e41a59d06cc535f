//! Plain-text rendering of use case results

use std::fmt::Write as _;

use domain::{
    AdminDashboard, Countdown, DashboardView, Notice, Route, Table, UserAccount, EMPTY_CELL,
};
use integration_portal::SessionEvent;

/// Notices, one per line
pub fn notices(notices: &[Notice]) -> String {
    notices.iter().map(|n| format!("{n}\n")).collect()
}

pub fn navigation(route: Option<Route>) -> String {
    route.map(|r| format!("→ {r}\n")).unwrap_or_default()
}

pub fn session_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Expired {
            redirect_to,
            rejected_path,
        } => format!("Session expired ({rejected_path} was rejected) → {redirect_to}\n"),
    }
}

/// Column-aligned table with an optional caption
pub fn table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = String::new();
    if let Some(caption) = &table.caption {
        let _ = writeln!(out, "{caption}");
    }
    out.push_str(&line(&table.headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(&rule));
    if table.is_empty() {
        out.push_str("(no data)\n");
    }
    for row in &table.rows {
        out.push_str(&line(row));
    }
    out
}

pub fn dashboard(view: &DashboardView) -> String {
    let upcoming = Table {
        caption: Some("Upcoming events".to_string()),
        headers: vec!["Id".to_string(), "Event".to_string(), "About".to_string()],
        rows: view
            .upcoming
            .iter()
            .map(|e| vec![e.id.to_string(), e.event_name.clone(), e.about.clone()])
            .collect(),
    };
    let participated = Table {
        caption: Some("Participated".to_string()),
        headers: vec!["Id".to_string(), "Event".to_string()],
        rows: view
            .participated
            .iter()
            .map(|e| vec![e.id.to_string(), e.event_name.clone()])
            .collect(),
    };
    let songs = Table {
        caption: Some("Your songs".to_string()),
        headers: vec!["Song".to_string(), "Topic".to_string(), "Karaoke".to_string()],
        rows: view
            .songs
            .iter()
            .map(|s| {
                vec![
                    s.song_details.clone(),
                    s.topic.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
                    if s.need_karaoke { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect(),
    };

    [table(&upcoming), table(&participated), table(&songs)].join("\n")
}

pub fn admin(dashboard: &AdminDashboard) -> String {
    let sections = [
        Table::from_slices(Some("Food preference"), "Preference", &dashboard.food),
        Table::from_slices(Some("Gender"), "Gender", &dashboard.gender),
        Table::from_slices(Some("Graduation year"), "Year", &dashboard.graduation_years),
        Table::from_slices(Some("Courses"), "Course", &dashboard.courses),
        Table::from_rows(
            Some(&format!("Alumni ({})", dashboard.total_alumni())),
            &dashboard.alumni,
        ),
        Table::from_rows(Some("Events"), &dashboard.events),
    ];
    sections.iter().map(table).collect::<Vec<_>>().join("\n")
}

pub fn account(user: &UserAccount) -> String {
    let profile = user.profile.clone().unwrap_or_default();
    let or_empty = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| EMPTY_CELL.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Name:            {}", or_empty(Some(profile.name)));
    let _ = writeln!(out, "Email:           {}", user.email);
    let _ = writeln!(out, "Course:          {}", or_empty(profile.course));
    let _ = writeln!(
        out,
        "Graduation year: {}",
        or_empty(profile.graduation_year.map(|y| y.to_string()))
    );
    let _ = writeln!(out, "Roll number:     {}", or_empty(profile.roll_number));
    let _ = writeln!(out, "Phone:           {}", or_empty(profile.phone_number));
    let _ = writeln!(out, "Gender:          {}", or_empty(profile.gender));
    let _ = writeln!(out, "Food preference: {}", or_empty(user.food_preference.clone()));
    let _ = writeln!(out, "Designation:     {}", or_empty(profile.designation));
    let _ = writeln!(out, "Address:         {}", or_empty(profile.address));
    out
}

pub fn countdown(countdown: &Countdown) -> String {
    if countdown.complete {
        return "The event has started!\n".to_string();
    }
    format!(
        "{} days {:02}:{:02}:{:02}\n",
        countdown.days, countdown.hours, countdown.minutes, countdown.seconds
    )
}

#[cfg(test)]
mod tests {
    use domain::ChartSlice;

    use super::*;

    #[test]
    fn notices_and_navigation() {
        let out = notices(&[Notice::success("Saved"), Notice::error("Nope")]);
        assert_eq!(out, "✔ Saved\n✖ Nope\n");
        assert_eq!(navigation(Some(Route::Dashboard)), "→ /dashboard\n");
        assert_eq!(navigation(None), "");
    }

    #[test]
    fn table_columns_are_aligned() {
        let t = Table {
            caption: Some("Demo".to_string()),
            headers: vec!["A".to_string(), "Long header".to_string()],
            rows: vec![vec!["wide cell".to_string(), "x".to_string()]],
        };
        let out = table(&t);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Demo");
        assert_eq!(lines[1], "A          Long header");
        assert_eq!(lines[3], "wide cell  x");
    }

    #[test]
    fn empty_tables_say_so() {
        let t = Table::from_slices(None, "Course", &Vec::<ChartSlice>::new());
        assert!(table(&t).contains("(no data)"));
    }

    #[test]
    fn session_expiry_names_the_redirect() {
        let out = session_event(&SessionEvent::Expired {
            redirect_to: Route::Home,
            rejected_path: "/events".to_string(),
        });
        assert!(out.contains("/events"));
        assert!(out.ends_with("→ /home\n"));
    }

    #[test]
    fn countdown_formats() {
        let c = Countdown {
            days: 3,
            hours: 4,
            minutes: 5,
            seconds: 6,
            complete: false,
        };
        assert_eq!(countdown(&c), "3 days 04:05:06\n");
        assert_eq!(
            countdown(&Countdown {
                complete: true,
                ..Countdown::default()
            }),
            "The event has started!\n"
        );
    }
}
