use std::rc::Rc;

use noql::zoon::*;
use noql::zoon::{Rgba, map_ref};

use noql::accordion::Accordion;
use noql::content::{self, Catalog, Topic};
use noql::feedback::{BlockId, CopyFeedback, SampleKind};
use noql::platform::browser::{BrowserClipboard, BrowserNavigation, TimerScheduler};

const HEADER_GRADIENT: &str = "linear-gradient(170deg, #336791 0%, #2F5E82 100%)";
const ACCENT_BORDER: &str = "4px solid #336791";

fn primary_color() -> Rgba {
    color!("#336791")
}

fn secondary_color() -> Rgba {
    color!("#2F5E82")
}

fn page_background_color() -> Rgba {
    color!("#f3f4f6")
}

fn card_background_color() -> Rgba {
    color!("#ffffff")
}

fn card_hover_color() -> Rgba {
    color!("#f9fafb")
}

fn divider_color() -> Rgba {
    color!("#e5e7eb")
}

fn body_text_color() -> Rgba {
    color!("#374151")
}

fn chevron_color() -> Rgba {
    color!("#6b7280")
}

fn code_background_color() -> Rgba {
    color!("#111827")
}

fn code_text_color() -> Rgba {
    color!("#f3f4f6")
}

fn copy_button_color() -> Rgba {
    color!("#e5e7eb")
}

fn copy_button_hover_color() -> Rgba {
    color!("#d1d5db")
}

fn copied_color() -> Rgba {
    color!("#16a34a")
}

fn main() {
    start_app("app", NoSqlSite::new);
}

#[derive(Clone)]
struct NoSqlSite {
    accordion: Accordion,
    feedback: CopyFeedback,
}

impl NoSqlSite {
    fn new() -> impl Element {
        // Loading fails only when two topic tags collapse to one slug.
        let catalog = Rc::new(Catalog::load().unwrap_throw());
        let navigation = Rc::new(BrowserNavigation::new());
        Self {
            accordion: Accordion::new(catalog, navigation),
            feedback: CopyFeedback::new(Rc::new(BrowserClipboard), Rc::new(TimerScheduler)),
        }
        .root()
    }

    fn root(&self) -> impl Element + use<> {
        Column::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Background::new().color(page_background_color()))
            .s(Font::new().color(body_text_color()))
            .s(Scrollbars::both())
            .item(self.header())
            .item(
                El::new()
                    .s(Width::fill())
                    .s(Height::fill())
                    .s(Padding::new().x(16).y(32))
                    .child(self.topic_list()),
            )
            .item(self.footer())
    }

    fn header(&self) -> impl Element + use<> {
        El::new()
            .s(Width::fill())
            .s(Padding::new().x(16).y(64))
            .s(Font::new().color(color!("#ffffff")))
            .update_raw_el(|raw_el| raw_el.style("background", HEADER_GRADIENT))
            .child(
                Column::new()
                    .s(Width::fill().max(1152))
                    .s(Align::new().center_x())
                    .s(Gap::new().y(16))
                    .item(
                        El::new()
                            .s(Font::new().size(36).weight(FontWeight::Bold))
                            .child(content::SITE_TITLE),
                    )
                    .item(
                        El::new()
                            .s(Font::new().size(20))
                            .child(content::SITE_TAGLINE),
                    ),
            )
    }

    fn topic_list(&self) -> impl Element + use<> {
        Column::new()
            .s(Width::fill().max(1152))
            .s(Align::new().center_x())
            .s(Gap::new().y(16))
            .items(
                self.accordion
                    .catalog()
                    .topics()
                    .iter()
                    .enumerate()
                    .map(|(index, topic)| self.topic_section(index, topic))
                    .collect::<Vec<_>>(),
            )
    }

    fn topic_section(&self, index: usize, topic: &'static Topic) -> impl Element + use<> {
        Column::new()
            .s(Width::fill())
            .s(Background::new().color(card_background_color()))
            .s(RoundedCorners::all(8))
            .s(Clip::both())
            .s(Shadows::new([
                Shadow::new()
                    .color(color!("rgba(0, 0, 0, 0.1)"))
                    .y(4)
                    .blur(6)
                    .spread(-1),
            ]))
            .item(self.section_header(index, topic))
            .item_signal(self.accordion.is_open_signal(index).map({
                let this = self.clone();
                move |is_open| {
                    if is_open {
                        Some(this.section_body(index, topic))
                    } else {
                        None
                    }
                }
            }))
    }

    fn section_header(&self, index: usize, topic: &'static Topic) -> impl Element + use<> {
        let hovered = Mutable::new(false);
        Button::new()
            .s(Width::fill())
            .s(Padding::new().x(24).y(16))
            .s(Background::new().color_signal(
                hovered
                    .signal()
                    .map_bool(card_hover_color, card_background_color),
            ))
            .update_raw_el(|raw_el| raw_el.style("border-left", ACCENT_BORDER))
            .label(
                Row::new()
                    .s(Width::fill())
                    .s(Align::new().center_y())
                    .item(
                        El::new()
                            .s(Align::new().left())
                            .s(
                                Font::new()
                                    .size(20)
                                    .weight(FontWeight::SemiBold)
                                    .color(primary_color()),
                            )
                            .child(topic.tag),
                    )
                    .item(
                        El::new()
                            .s(Align::new().right())
                            .s(Font::new().size(16).color(chevron_color()))
                            .child_signal(
                                self.accordion
                                    .is_open_signal(index)
                                    .map_bool(|| "▲", || "▼"),
                            ),
                    ),
            )
            .on_hovered_change(move |is_hovered| hovered.set_neq(is_hovered))
            .on_press({
                let accordion = self.accordion.clone();
                move || accordion.toggle(index)
            })
    }

    fn section_body(&self, index: usize, topic: &'static Topic) -> impl Element + use<> {
        Column::new()
            .s(Width::fill())
            .s(Padding::new().x(24).y(16))
            .s(Gap::new().y(16))
            .s(Borders::new().top(Border::new().color(divider_color()).width(1)))
            .item(
                Column::new()
                    .s(Width::fill())
                    .s(Gap::new().y(8))
                    .item(section_heading(content::CLAIM_HEADING, secondary_color()))
                    .item(body_paragraph(topic.claim)),
            )
            .item(
                Column::new()
                    .s(Width::fill())
                    .s(Gap::new().y(8))
                    .item(section_heading(content::REBUTTAL_HEADING, primary_color()))
                    .item(body_paragraph(topic.rebuttal)),
            )
            .item(
                Column::new()
                    .s(Width::fill())
                    .s(Gap::new().y(8))
                    .item(section_heading(content::SAMPLES_HEADING, secondary_color()))
                    .item(
                        Row::new()
                            .s(Width::fill())
                            .s(Align::new().top())
                            .s(Gap::new().x(16).y(16))
                            .multiline()
                            .item(self.sample_block(
                                BlockId::new(SampleKind::NoSql, index),
                                content::NOSQL_SAMPLE_TITLE,
                                secondary_color(),
                                topic.nosql_sample,
                            ))
                            .item(self.sample_block(
                                BlockId::new(SampleKind::Sql, index),
                                content::SQL_SAMPLE_TITLE,
                                primary_color(),
                                topic.sql_sample,
                            )),
                    ),
            )
    }

    fn sample_block(
        &self,
        block: BlockId,
        title: &'static str,
        title_background: Rgba,
        code: &'static str,
    ) -> impl Element + use<> {
        Column::new()
            .s(Width::fill())
            .s(Align::new().top())
            .item(
                Row::new()
                    .s(Width::fill())
                    .s(Align::new().center_y())
                    .item(
                        El::new()
                            .s(Padding::new().x(12).y(4))
                            .s(RoundedCorners::new().top(6))
                            .s(Background::new().color(title_background))
                            .s(
                                Font::new()
                                    .size(13)
                                    .weight(FontWeight::SemiBold)
                                    .color(color!("#ffffff"))
                                    .no_wrap(),
                            )
                            .child(title),
                    )
                    .item(
                        El::new()
                            .s(Align::new().right())
                            .child(self.copy_button(block, code)),
                    ),
            )
            .item(
                El::new()
                    .s(Width::fill())
                    .s(Padding::all(16))
                    .s(RoundedCorners::new().bottom(6).top_right(6))
                    .s(Background::new().color(code_background_color()))
                    .s(
                        Font::new()
                            .size(13)
                            .color(code_text_color())
                            .family([FontFamily::Monospace]),
                    )
                    .s(Scrollbars::both())
                    .update_raw_el(|raw_el| raw_el.style("white-space", "pre"))
                    .child(code),
            )
    }

    fn copy_button(&self, block: BlockId, code: &'static str) -> impl Element + use<> {
        let hovered = Mutable::new(false);
        Button::new()
            .s(Padding::new().x(8).y(4))
            .s(RoundedCorners::all(4))
            .s(Background::new().color_signal(map_ref! {
                let hovered = hovered.signal(),
                let marked = self.feedback.is_marked_signal(block) =>
                if *marked {
                    copied_color()
                } else if *hovered {
                    copy_button_hover_color()
                } else {
                    copy_button_color()
                }
            }))
            .s(Font::new().size(12).color_signal(
                self.feedback
                    .is_marked_signal(block)
                    .map_bool(|| color!("#ffffff"), body_text_color),
            ))
            .label_signal(
                self.feedback
                    .is_marked_signal(block)
                    .map_bool(|| "Copied!", || "Copy"),
            )
            .on_hovered_change(move |is_hovered| hovered.set_neq(is_hovered))
            .on_press({
                let feedback = self.feedback.clone();
                move || feedback.copy(block, code)
            })
    }

    fn footer(&self) -> impl Element + use<> {
        El::new()
            .s(Width::fill())
            .s(Padding::new().x(16).y(32))
            .s(Font::new().color(color!("#ffffff")))
            .update_raw_el(|raw_el| raw_el.style("background", HEADER_GRADIENT))
            .child(
                Row::new()
                    .s(Align::new().center_x())
                    .s(Gap::new().x(4))
                    .multiline()
                    .item(El::new().child(content::FOOTER_NOTE))
                    .item(El::new().child("(made by"))
                    .item(
                        Link::new()
                            .s(Font::new().line(FontLine::new().underline()))
                            .label(content::FOOTER_AUTHOR)
                            .to(content::FOOTER_AUTHOR_URL),
                    )
                    .item(El::new().child(")")),
            )
    }
}

fn section_heading(text: &'static str, color: Rgba) -> impl Element {
    El::new()
        .s(Font::new().size(18).weight(FontWeight::Bold).color(color))
        .child(text)
}

fn body_paragraph(text: &'static str) -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Font::new().color(body_text_color()))
        .child(text)
}
