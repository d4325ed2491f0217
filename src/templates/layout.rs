use maud::{html, Markup, DOCTYPE};

pub fn base_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class="h-full" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Groupie Tracker" }

                link rel="stylesheet" href="/static/css/style.css";
            }
            body class="h-full" {
                div class="min-h-full" {
                    (nav_bar())

                    main class="container" {
                        (content)
                    }

                    (footer())
                }
            }
        }
    }
}

fn nav_bar() -> Markup {
    html! {
        nav class="nav" {
            div class="container nav-inner" {
                a href="/" class="brand" {
                    span class="brand-icon" { "🎸" }
                    span class="brand-name" { "Groupie Tracker" }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="footer" {
            div class="container" {
                "Groupie Tracker - artists, tours and where they played"
            }
        }
    }
}
