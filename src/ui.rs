// 🖥️ Dashboard - read-only terminal view over the academic system
//
// Every frame recomputes its figures from the system, so what is shown is
// always derived from the current records.

use academic_records::{
    AcademicSystem, AnalyticsEngine, HistogramBin, MonthlyAverage, PerformanceBand,
    ProgramAverage, Standing, SubjectStatus,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Students,
    Subjects,
    Professors,
    Grades,
    Statistics,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Students,
        Page::Subjects,
        Page::Professors,
        Page::Grades,
        Page::Statistics,
    ];

    pub fn next(&self) -> Self {
        match self {
            Page::Students => Page::Subjects,
            Page::Subjects => Page::Professors,
            Page::Professors => Page::Grades,
            Page::Grades => Page::Statistics,
            Page::Statistics => Page::Students,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Students => Page::Statistics,
            Page::Subjects => Page::Students,
            Page::Professors => Page::Subjects,
            Page::Grades => Page::Professors,
            Page::Statistics => Page::Grades,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Students => "Students",
            Page::Subjects => "Subjects",
            Page::Professors => "Professors",
            Page::Grades => "Grades",
            Page::Statistics => "Statistics",
        }
    }
}

pub struct App {
    pub system: AcademicSystem,
    pub risk_threshold: f64,
    pub current_page: Page,
    pub show_detail: bool,
    states: [TableState; 5],
}

impl App {
    pub fn new(system: AcademicSystem, risk_threshold: f64) -> Self {
        let mut app = Self {
            system,
            risk_threshold,
            current_page: Page::Students,
            show_detail: false,
            states: Default::default(),
        };
        for page in Page::ALL {
            if app.row_count(page) > 0 {
                app.state_for(page).select(Some(0));
            }
        }
        app
    }

    /// Rows in the selectable table of `page`
    pub fn row_count(&self, page: Page) -> usize {
        match page {
            Page::Students => self.system.students().len(),
            Page::Subjects => self.system.subjects().len(),
            Page::Professors => self.system.professors().len(),
            Page::Grades => self.system.grades().len(),
            Page::Statistics => AnalyticsEngine::new(&self.system).rank_students().len(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.states[index_of(self.current_page)].selected()
    }

    fn state_for(&mut self, page: Page) -> &mut TableState {
        &mut self.states[index_of(page)]
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.row_count(self.current_page);
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count(self.current_page);
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.row_count(self.current_page);
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) => (i + PAGE_STEP).min(len - 1),
            None => 0,
        };
        self.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.row_count(self.current_page) == 0 {
            return;
        }
        let i = self.selected().map(|i| i.saturating_sub(PAGE_STEP)).unwrap_or(0);
        self.select(Some(i));
    }

    pub fn first(&mut self) {
        if self.row_count(self.current_page) > 0 {
            self.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let len = self.row_count(self.current_page);
        if len > 0 {
            self.select(Some(len - 1));
        }
    }

    fn select(&mut self, index: Option<usize>) {
        let page = self.current_page;
        self.state_for(page).select(index);
    }
}

fn index_of(page: Page) -> usize {
    match page {
        Page::Students => 0,
        Page::Subjects => 1,
        Page::Professors => 2,
        Page::Grades => 3,
        Page::Statistics => 4,
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Students {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_students(f, content_chunks[0], app);
        render_student_detail(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Students => render_students(f, chunks[1], app),
            Page::Subjects => render_subjects(f, chunks[1], app),
            Page::Professors => render_professors(f, chunks[1], app),
            Page::Grades => render_grades(f, chunks[1], app),
            Page::Statistics => render_statistics(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let summary = AnalyticsEngine::new(&app.system).system_summary();

    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Grades: {}", summary.total_grades),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Mean: {}", format_average(summary.overall_mean)),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Academic Records "),
    );

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn framed_table<'a>(rows: Vec<Row<'a>>, widths: Vec<Constraint>, header: Row<'a>, title: &str) -> Table<'a> {
    Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", title)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ")
}

fn render_students(f: &mut Frame, area: Rect, app: &mut App) {
    let engine = AnalyticsEngine::new(&app.system);
    let threshold = app.risk_threshold;

    let rows: Vec<Row> = app
        .system
        .students()
        .iter()
        .map(|student| {
            let average = engine.average_for_student(&student.code);
            let weighted = engine.weighted_average_for_student(&student.code);
            let color = average_color(average, threshold);
            let band = average
                .map(|a| PerformanceBand::classify(a).as_str())
                .unwrap_or("-");

            Row::new(vec![
                Cell::from(student.code.clone()),
                Cell::from(truncate(&student.name, 28)),
                Cell::from(truncate(&student.program, 20)),
                Cell::from(format_average(average)).style(Style::default().fg(color)),
                Cell::from(format_average(weighted)),
                Cell::from(band).style(Style::default().fg(color)),
            ])
            .height(1)
        })
        .collect();

    let table = framed_table(
        rows,
        vec![
            Constraint::Length(10),
            Constraint::Length(30),
            Constraint::Length(22),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
        header_row(&["Code", "Name", "Program", "Average", "Weighted", "Band"]),
        "Students",
    );

    f.render_stateful_widget(table, area, &mut app.states[index_of(Page::Students)]);
}

fn render_subjects(f: &mut Frame, area: Rect, app: &mut App) {
    let engine = AnalyticsEngine::new(&app.system);

    let rows: Vec<Row> = app
        .system
        .subjects()
        .iter()
        .map(|subject| {
            let professor = subject
                .professor
                .as_deref()
                .and_then(|code| app.system.professor(code))
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "-".to_string());
            let status = engine
                .subject_status(&subject.code)
                .unwrap_or(SubjectStatus::NoGrades);
            let status_color = match status {
                SubjectStatus::Excellent => Color::Green,
                SubjectStatus::Good => Color::Cyan,
                SubjectStatus::NeedsAttention => Color::Red,
                SubjectStatus::NoProfessor | SubjectStatus::NoGrades => Color::DarkGray,
            };

            Row::new(vec![
                Cell::from(subject.code.clone()),
                Cell::from(truncate(&subject.name, 28)),
                Cell::from(subject.credits.to_string()),
                Cell::from(truncate(&professor, 24)),
                Cell::from(format_average(engine.average_for_subject(&subject.code))),
                Cell::from(status.as_str()).style(Style::default().fg(status_color)),
            ])
            .height(1)
        })
        .collect();

    let table = framed_table(
        rows,
        vec![
            Constraint::Length(10),
            Constraint::Length(30),
            Constraint::Length(8),
            Constraint::Length(26),
            Constraint::Length(9),
            Constraint::Length(16),
        ],
        header_row(&["Code", "Name", "Credits", "Professor", "Average", "Status"]),
        "Subjects",
    );

    f.render_stateful_widget(table, area, &mut app.states[index_of(Page::Subjects)]);
}

fn render_professors(f: &mut Frame, area: Rect, app: &mut App) {
    let load = AnalyticsEngine::new(&app.system).professor_load();

    let rows: Vec<Row> = app
        .system
        .professors()
        .iter()
        .map(|professor| {
            let (subjects, credits) = load
                .iter()
                .find(|l| l.code == professor.code)
                .map(|l| (l.subjects, l.credits))
                .unwrap_or((0, 0));

            Row::new(vec![
                Cell::from(professor.code.clone()),
                Cell::from(truncate(&professor.name, 28)),
                Cell::from(truncate(&professor.specialty, 20)),
                Cell::from(truncate(&professor.email, 26)),
                Cell::from(subjects.to_string()),
                Cell::from(credits.to_string()),
            ])
            .height(1)
        })
        .collect();

    let table = framed_table(
        rows,
        vec![
            Constraint::Length(10),
            Constraint::Length(30),
            Constraint::Length(22),
            Constraint::Length(28),
            Constraint::Length(9),
            Constraint::Length(8),
        ],
        header_row(&["Code", "Name", "Specialty", "Email", "Subjects", "Credits"]),
        "Professors",
    );

    f.render_stateful_widget(table, area, &mut app.states[index_of(Page::Professors)]);
}

fn render_grades(f: &mut Frame, area: Rect, app: &mut App) {
    let threshold = app.risk_threshold;

    let rows: Vec<Row> = app
        .system
        .grades()
        .all()
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let color = average_color(Some(entry.score), threshold);
            Row::new(vec![
                Cell::from(position.to_string()),
                Cell::from(entry.student.clone()),
                Cell::from(entry.subject.clone()),
                Cell::from(format!("{:.2}", entry.score)).style(Style::default().fg(color)),
                Cell::from(format!("{}%", entry.weight)),
                Cell::from(entry.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&entry.description, 30)),
            ])
            .height(1)
        })
        .collect();

    let table = framed_table(
        rows,
        vec![
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(32),
        ],
        header_row(&["#", "Student", "Subject", "Score", "Weight", "Date", "Description"]),
        "Grade Ledger",
    );

    f.render_stateful_widget(table, area, &mut app.states[index_of(Page::Grades)]);
}

fn render_statistics(f: &mut Frame, area: Rect, app: &mut App) {
    let engine = AnalyticsEngine::new(&app.system);
    let summary = engine.system_summary();
    let distribution = engine.grade_distribution();
    let ranking = engine.rank_students();
    let at_risk = engine.students_at_risk(app.risk_threshold);
    let programs = engine.program_averages();
    let months = engine.monthly_averages();
    let histogram = engine.score_histogram(5);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(vec![
            Span::styled("  Totals: ", label),
            Span::raw(format!(
                "{} students, {} subjects, {} professors, {} grade entries",
                summary.total_students,
                summary.total_subjects,
                summary.total_professors,
                summary.total_grades
            )),
        ]),
        Line::from(vec![
            Span::styled("  System mean: ", label),
            Span::raw(format_average(summary.overall_mean)),
        ]),
        Line::from(vec![
            Span::styled("  Best student: ", label),
            Span::raw(format_standing(summary.best_student.as_ref())),
            Span::styled("   Worst student: ", label),
            Span::raw(format_standing(summary.worst_student.as_ref())),
        ]),
        Line::from(vec![
            Span::styled("  Best subject: ", label),
            Span::raw(format_standing(summary.best_subject.as_ref())),
            Span::styled("   Worst subject: ", label),
            Span::raw(format_standing(summary.worst_subject.as_ref())),
        ]),
        Line::from(vec![
            Span::styled("  Distribution: ", label),
            Span::styled(format!("{} excellent ", distribution.excellent), Style::default().fg(Color::Green)),
            Span::styled(format!("{} good ", distribution.good), Style::default().fg(Color::Cyan)),
            Span::styled(format!("{} fair ", distribution.fair), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{} failing", distribution.failing), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("  At risk: ", label),
            Span::styled(
                format!("{} below {:.2}", at_risk.len(), app.risk_threshold),
                Style::default().fg(if at_risk.is_empty() { Color::Green } else { Color::Red }),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Programs: ", label),
            Span::raw(program_summary(&programs)),
        ]),
        Line::from(vec![
            Span::styled("  Monthly: ", label),
            Span::raw(trend_summary(&months)),
        ]),
        Line::from(vec![
            Span::styled("  Scores: ", label),
            Span::raw(histogram_summary(&histogram)),
        ]),
    ];

    let overview = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Overview "),
    );
    f.render_widget(overview, chunks[0]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let ranking_rows: Vec<Row> = ranking
        .iter()
        .enumerate()
        .map(|(i, standing)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(standing.code.clone()),
                Cell::from(student_name(&app.system, &standing.code)),
                Cell::from(format!("{:.2}", standing.average)),
            ])
        })
        .collect();
    let ranking_table = framed_table(
        ranking_rows,
        vec![
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(26),
            Constraint::Length(8),
        ],
        header_row(&["#", "Code", "Name", "Average"]),
        "Ranking",
    );
    f.render_stateful_widget(ranking_table, lists[0], &mut app.states[index_of(Page::Statistics)]);

    let risk_rows: Vec<Row> = at_risk
        .iter()
        .map(|standing| {
            Row::new(vec![
                Cell::from(standing.code.clone()),
                Cell::from(student_name(&app.system, &standing.code)),
                Cell::from(format!("{:.2}", standing.average)).style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();
    let risk_table = framed_table(
        risk_rows,
        vec![Constraint::Length(10), Constraint::Length(26), Constraint::Length(8)],
        header_row(&["Code", "Name", "Average"]),
        "At Risk",
    );
    f.render_widget(risk_table, lists[1]);
}

fn render_student_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Student Details ");

    let report = app
        .selected()
        .and_then(|i| app.system.students().list().get(i))
        .and_then(|s| AnalyticsEngine::new(&app.system).student_report(&s.code));

    let report = match report {
        Some(r) => r,
        None => {
            f.render_widget(Paragraph::new("No student selected").block(block), area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Name: ", label), Span::raw(report.student.name.clone())]),
        Line::from(vec![Span::styled("  Program: ", label), Span::raw(report.student.program.clone())]),
        Line::from(vec![Span::styled("  Email: ", label), Span::raw(report.student.email.clone())]),
        Line::from(vec![Span::styled("  Phone: ", label), Span::raw(report.student.phone.clone())]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Average: ", label),
            Span::raw(format_average(report.average)),
            Span::styled("   Weighted: ", label),
            Span::raw(format_average(report.weighted_average)),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(vec![Span::styled(
            "  GRADES",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
    ];

    for entry in &report.entries {
        content.push(Line::from(format!(
            "  {}  {:<8} {:.2} ({}%)",
            entry.date.format("%Y-%m-%d"),
            entry.subject,
            entry.score,
            entry.weight
        )));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.row_count(app.current_page);

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if app.current_page == Page::Students {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Details"));
    }
    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Fast | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn average_color(average: Option<f64>, threshold: f64) -> Color {
    match average {
        None => Color::DarkGray,
        Some(a) if a < threshold => Color::Red,
        Some(a) => match PerformanceBand::classify(a) {
            PerformanceBand::Excellent => Color::Green,
            PerformanceBand::Good => Color::Cyan,
            _ => Color::White,
        },
    }
}

fn format_average(average: Option<f64>) -> String {
    average
        .map(|a| format!("{:.2}", a))
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_standing(standing: Option<&Standing>) -> String {
    standing
        .map(|s| format!("{} ({:.2})", s.code, s.average))
        .unwrap_or_else(|| "n/a".to_string())
}

fn program_summary(programs: &[ProgramAverage]) -> String {
    if programs.is_empty() {
        return "n/a".to_string();
    }
    programs
        .iter()
        .map(|p| format!("{} {:.2} ({})", p.program, p.average, p.students))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Most recent months only; the line has no room for a full history
fn trend_summary(months: &[MonthlyAverage]) -> String {
    if months.is_empty() {
        return "n/a".to_string();
    }
    months
        .iter()
        .skip(months.len().saturating_sub(6))
        .map(|m| format!("{} {:.2}", m.month, m.average))
        .collect::<Vec<_>>()
        .join(" → ")
}

fn histogram_summary(bins: &[HistogramBin]) -> String {
    bins.iter()
        .map(|b| format!("[{:.0}-{:.0}] {}", b.lower, b.upper, b.count))
        .collect::<Vec<_>>()
        .join("  ")
}

fn student_name(system: &AcademicSystem, code: &str) -> String {
    system
        .student(code)
        .map(|s| truncate(&s.name, 24))
        .unwrap_or_default()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// TESTS
// ============================================================================
