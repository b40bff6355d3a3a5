use crate::helpers::{escape_html, local_time};
use crate::task::{TaskRecord, TaskStatus};

fn status_badge(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => {
            r#"<span class="text-green-500"><i class="fa fa-check-circle"></i> Completed</span>"#
        }
        TaskStatus::Running => {
            r#"<span class="text-blue-500 animate-pulse"><i class="fa fa-spinner fa-spin"></i> Running</span>"#
        }
        TaskStatus::Failed => r#"<span class="text-red-500"><i class="fa fa-times-circle"></i> Failed</span>"#,
    }
}

/// History panel, newest first. Each entry carries its index for selection.
pub fn render_history<'a>(records: impl IntoIterator<Item = &'a TaskRecord>) -> String {
    let items: Vec<String> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                r#"<div class="bg-white rounded p-2 shadow-sm hover:shadow transition-shadow cursor-pointer" data-history-index="{}">
  <div class="flex justify-between items-center">
    <span class="text-sm font-medium">{}</span>
    <span class="text-xs text-gray-500">{}</span>
  </div>
  <div class="text-xs text-gray-500 mt-1">{}</div>
</div>"#,
                index,
                escape_html(&record.name),
                local_time(record.timestamp),
                status_badge(record.status)
            )
        })
        .collect();

    if items.is_empty() {
        return r#"<div class="text-xs text-gray-500 italic text-center py-3">No history yet</div>"#.to_string();
    }
    items.join("\n")
}
