use chat_core::{AnswerStatus, AppViewModel, Message, SearchResult, Sender, UploadState};

/// Text projection of the view model. Remembers what was already printed so
/// each frame only emits what changed.
#[derive(Debug, Default)]
pub struct Screen {
    shown_messages: usize,
    answer_status: AnswerStatus,
    search: Option<(bool, Vec<SearchResult>)>,
    upload: Option<(UploadState, bool)>,
}

impl Screen {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        for message in view.messages.iter().skip(self.shown_messages) {
            lines.push(message_line(message));
        }
        self.shown_messages = view.messages.len();

        if view.answer_status != self.answer_status {
            if let AnswerStatus::Sending { pending } = view.answer_status {
                lines.push(format!("   … waiting for {pending} answer(s)"));
            }
            self.answer_status = view.answer_status;
        }

        let search = (view.search_loading, view.search_results.clone());
        if view.search_started && self.search.as_ref() != Some(&search) {
            lines.extend(search_lines(view));
            self.search = Some(search);
        }

        let upload = (view.upload.clone(), view.uploading);
        if view.upload.file_name.is_some() && self.upload.as_ref() != Some(&upload) {
            lines.extend(upload_lines(&view.upload));
            self.upload = Some(upload);
        }

        lines
    }
}

fn message_line(message: &Message) -> String {
    let icon = match message.sender() {
        Sender::Bot => "🤖",
        Sender::User => "👤",
    };
    format!("[{}] {} {}", message.timestamp(), icon, message.text())
}

fn search_lines(view: &AppViewModel) -> Vec<String> {
    if view.search_loading {
        return vec![format!("🔎 searching \"{}\" ...", view.search_query)];
    }
    if view.search_results.is_empty() {
        return vec![format!("🔎 no results for \"{}\"", view.search_query)];
    }

    let mut lines = vec![format!("🔎 results for \"{}\":", view.search_query)];
    for (idx, result) in view.search_results.iter().enumerate() {
        lines.push(format!("  {}. {}", idx + 1, result.title));
        if let Some(snippet) = result.snippet.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("     {snippet}"));
        }
        lines.push(format!("     {}", result.url));
    }
    lines
}

fn upload_lines(upload: &UploadState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(name) = &upload.file_name {
        lines.push(format!("📄 {name}"));
    }
    if !upload.summary_text.is_empty() {
        lines.push(upload.summary_text.clone());
    }
    lines
}
