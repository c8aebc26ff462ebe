use page_core::{PageViewModel, VideoWidgetView};

/// Projects the view model into terminal rows, one per mounted element.
pub fn render_lines(view: &PageViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "page: {}",
        if view.loaded { "loaded" } else { "loading" }
    ));

    if let Some(open) = view.nav_open {
        lines.push(format!("nav: {}", if open { "open" } else { "closed" }));
    }

    if let Some(form) = &view.form {
        let control = if form.control.disabled {
            format!("[{}] (disabled)", form.control.label)
        } else {
            format!("[{}]", form.control.label)
        };
        lines.push(format!("contact form: {control}"));
    }

    if let Some(widget) = &view.widget {
        lines.push(format!("latest video: {}", widget_summary(widget)));
    }

    lines
}

fn widget_summary(view: &VideoWidgetView) -> String {
    match view {
        VideoWidgetView::Loading => "loading".to_string(),
        VideoWidgetView::Player { video_id, label } => {
            format!("player {video_id} ({label})")
        }
        VideoWidgetView::Fallback { channel_url } => format!("fallback -> {channel_url}"),
    }
}

/// HTML fragment for the video widget mount, matching what the page embeds.
pub fn widget_html(view: &VideoWidgetView) -> String {
    match view {
        VideoWidgetView::Loading => String::new(),
        VideoWidgetView::Player { video_id, label } => format!(
            concat!(
                "<iframe src=\"https://www.youtube.com/embed/{id}?rel=0\" ",
                "title=\"{title}\" frameborder=\"0\" ",
                "allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; ",
                "gyroscope; picture-in-picture\" allowfullscreen></iframe>"
            ),
            id = escape_attr(video_id),
            title = escape_attr(label),
        ),
        VideoWidgetView::Fallback { channel_url } => format!(
            concat!(
                "<p>Unable to load video. ",
                "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                "Visit my channel</a></p>"
            ),
            url = escape_attr(channel_url),
        ),
    }
}

// Titles come from the remote feed and land inside an attribute.
fn escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
