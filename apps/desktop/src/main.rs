use contexteq_core::{
    Gateway, GatewayConfig, GatewayMode, Provider, Tab, Widget,
    format::{format_bar_chart, format_table},
    views::{
        self, NoticeLevel,
        campaign_explainer::{self, Metric},
        context_match, creative_brief, realtime_bot, safety_radar,
        upload_index::{self, IndexForm},
    },
};
use iced::widget::{
    Column, Row, button, column, container, pick_list, row, scrollable, text, text_input,
};
use iced::{Color, Element, Font, Length, Task};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .run()
}

struct App {
    tab: Tab,
    api_key: String,
    index: IndexForm,
    index_file: String,
    query: String,
    metric: Metric,
    bot_file: String,
    running: bool,
    output: Vec<Widget>,
}

#[derive(Debug, Clone)]
enum Message {
    TabSelected(Tab),
    ApiKeyChanged(String),
    IndexFileChanged(String),
    ModelChanged(String),
    LibraryChanged(String),
    QueryChanged(String),
    MetricSelected(Metric),
    BotFileChanged(String),
    Run,
    Rendered(Tab, Vec<Widget>),
}

impl App {
    fn new() -> (Self, Task<Message>) {
        (
            Self {
                tab: Tab::UploadIndex,
                api_key: String::new(),
                index: IndexForm::default(),
                index_file: String::new(),
                query: context_match::default_query().to_string(),
                metric: Metric::default(),
                bot_file: String::new(),
                running: false,
                output: Vec::new(),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        format!("{} — Contextual & Safe Video Intelligence", views::APP_NAME)
    }

    fn mode(&self) -> GatewayMode {
        GatewayMode::select(Some(self.api_key.as_str()), false)
    }

    fn gateway(&self) -> Gateway {
        Gateway::new(GatewayConfig::new(
            Provider::default(),
            Some(self.api_key.clone()),
            false,
        ))
    }

    /// Tabs that render straight from fixtures, without a button press.
    fn static_output(&self) -> Option<Vec<Widget>> {
        match self.tab {
            Tab::CreativeBrief => Some(creative_brief::run()),
            Tab::CampaignExplainer => Some(campaign_explainer::run(self.metric)),
            _ => None,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.tab = tab;
                self.output = self.static_output().unwrap_or_default();
            }
            Message::ApiKeyChanged(key) => self.api_key = key,
            Message::IndexFileChanged(file) => self.index_file = file,
            Message::ModelChanged(model) => self.index.model = model,
            Message::LibraryChanged(library) => self.index.library = library,
            Message::QueryChanged(query) => self.query = query,
            Message::MetricSelected(metric) => {
                self.metric = metric;
                self.output = self.static_output().unwrap_or_default();
            }
            Message::BotFileChanged(file) => self.bot_file = file,
            Message::Run => return self.run(),
            Message::Rendered(tab, widgets) => {
                self.running = false;
                if tab == self.tab {
                    self.output = widgets;
                }
            }
        }
        Task::none()
    }

    fn run(&mut self) -> Task<Message> {
        let tab = self.tab;
        tracing::debug!(tab = tab.title(), mode = %self.mode(), "run");
        match tab {
            Tab::UploadIndex => {
                let form = IndexForm {
                    file_name: Some(self.index_file.clone()).filter(|f| !f.is_empty()),
                    ..self.index.clone()
                };
                self.output = upload_index::submit(&form);
                Task::none()
            }
            Tab::CreativeBrief | Tab::CampaignExplainer => {
                self.output = self.static_output().unwrap_or_default();
                Task::none()
            }
            Tab::SafetyRadar => {
                self.running = true;
                let gateway = self.gateway();
                Task::perform(
                    async move { safety_radar::run(&gateway).await },
                    move |widgets| Message::Rendered(tab, widgets),
                )
            }
            Tab::ContextMatch => {
                self.running = true;
                let gateway = self.gateway();
                let query = self.query.clone();
                Task::perform(
                    async move { context_match::run(&gateway, &query).await },
                    move |widgets| Message::Rendered(tab, widgets),
                )
            }
            Tab::RealTimeBot => {
                self.running = true;
                let gateway = self.gateway();
                let file = Some(self.bot_file.clone()).filter(|f| !f.is_empty());
                Task::perform(
                    async move { realtime_bot::run(&gateway, file.as_deref()).await },
                    move |widgets| Message::Rendered(tab, widgets),
                )
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        row![
            container(self.sidebar()).padding(16).width(Length::Fixed(260.0)),
            scrollable(self.main_panel().padding(20)).width(Length::Fill),
        ]
        .into()
    }

    fn sidebar(&self) -> Column<'_, Message> {
        let mut col = Column::new()
            .spacing(10)
            .push(text(format!("🎬 {}", views::APP_NAME)).size(24))
            .push(text(views::TAGLINE).size(13))
            .push(
                text_input("Video Intelligence API Key (optional)", &self.api_key)
                    .on_input(Message::ApiKeyChanged)
                    .secure(true),
            )
            .push(text(self.mode().banner()).size(14));

        for tab in Tab::ALL {
            let label = if tab == self.tab {
                format!("▸ {}", tab.title())
            } else {
                tab.title().to_string()
            };
            col = col.push(
                button(text(label))
                    .on_press(Message::TabSelected(tab))
                    .width(Length::Fill),
            );
        }
        col
    }

    fn main_panel(&self) -> Column<'_, Message> {
        let mut col = Column::new().spacing(12);
        let intro = [views::header(), self.tab.intro()].concat();
        for w in &intro {
            col = col.push(widget_view(w));
        }
        col = col.push(self.controls());
        if self.running {
            col = col.push(text("Processing…"));
        }
        for w in &self.output {
            col = col.push(widget_view(w));
        }
        col.push(widget_view(&views::footer()))
    }

    fn controls(&self) -> Element<'_, Message> {
        let run = |label: &'static str| {
            let b = button(text(label));
            if self.running { b } else { b.on_press(Message::Run) }
        };
        match self.tab {
            Tab::UploadIndex => column![
                text_input("Video file (mp4, mov, mkv, webm)", &self.index_file)
                    .on_input(Message::IndexFileChanged),
                row![
                    text_input("Model", &self.index.model).on_input(Message::ModelChanged),
                    text_input("Library / Index Name", &self.index.library)
                        .on_input(Message::LibraryChanged),
                ]
                .spacing(10),
                run("Create Index"),
            ]
            .spacing(8)
            .into(),
            Tab::SafetyRadar => run("Run Safety Analysis").into(),
            Tab::ContextMatch => column![
                text_input("Context query (e.g., 'sports', 'family', 'outdoor')", &self.query)
                    .on_input(Message::QueryChanged),
                run("Search Scenes"),
            ]
            .spacing(8)
            .into(),
            Tab::CreativeBrief => column![].into(),
            Tab::CampaignExplainer => row![
                text("Metric to visualize"),
                pick_list(&Metric::ALL[..], Some(self.metric), Message::MetricSelected),
            ]
            .spacing(10)
            .into(),
            Tab::RealTimeBot => column![
                text_input("New asset (simulate)", &self.bot_file)
                    .on_input(Message::BotFileChanged),
                run("Analyze New Upload"),
            ]
            .spacing(8)
            .into(),
        }
    }
}

fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::from_rgb8(34, 197, 94),
        NoticeLevel::Info => Color::from_rgb8(59, 130, 246),
        NoticeLevel::Warning => Color::from_rgb8(234, 179, 8),
    }
}

fn widget_view<'a>(widget: &Widget) -> Element<'a, Message> {
    match widget {
        Widget::Heading { text: t } => text(t.clone()).size(22).into(),
        Widget::Caption { text: t } => text(t.clone())
            .size(13)
            .color(Color::from_rgb8(107, 114, 128))
            .into(),
        Widget::Label { text: t } => text(t.clone()).size(16).into(),
        Widget::Text { text: t } => text(t.clone()).into(),
        Widget::Metric { label, value } => {
            column![text(label.clone()).size(13), text(value.clone()).size(28)].into()
        }
        Widget::Notice { level, text: t } => text(t.clone()).color(notice_color(*level)).into(),
        Widget::Expander { title, body } => {
            let mut col = Column::new().spacing(4).push(text(title.clone()).size(15));
            for child in body {
                col = col.push(container(widget_view(child)).padding(8));
            }
            col.into()
        }
        Widget::Json { value } => text(serde_json::to_string_pretty(value).unwrap_or_default())
            .font(Font::MONOSPACE)
            .into(),
        Widget::Table { columns, rows } => text(format_table(columns, rows))
            .font(Font::MONOSPACE)
            .into(),
        Widget::BarChart { title, bars, .. } => column![
            text(title.clone()).size(16),
            text(format_bar_chart(bars, 40)).font(Font::MONOSPACE),
        ]
        .into(),
        Widget::Bullets { items } => Column::with_children(
            items.iter().map(|i| text(format!("• {i}")).into()),
        )
        .into(),
        Widget::Columns { columns } => Row::with_children(columns.iter().map(|column| {
            Column::with_children(column.iter().map(widget_view))
                .width(Length::Fill)
                .into()
        }))
        .spacing(16)
        .into(),
    }
}
