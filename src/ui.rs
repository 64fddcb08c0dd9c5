use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as HandLine},
        Block, Borders, Clear, Paragraph, Widget,
    },
    Frame,
};

use klok::{
    app::App,
    clock::Clock,
    face::Face,
    stopwatch::{SessionSink, TimerState},
    theme::Palette,
};

/// Rows the readout travels up when the clock face slides in
const SLIDE_ROWS: f64 = 6.0;
const CLOCK_WIDTH: u16 = 24;
const CLOCK_HEIGHT: u16 = 11;
const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 5;

pub fn draw<C: Clock, P: SessionSink>(app: &App<C, P>, f: &mut Frame) {
    f.render_widget(StopwatchScreen { app }, f.area());
}

pub struct StopwatchScreen<'a, C: Clock, P: SessionSink> {
    pub app: &'a App<C, P>,
}

impl<C: Clock, P: SessionSink> Widget for StopwatchScreen<'_, C, P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let face = self.app.face();
        let palette = self.app.theme.mode_now().palette();
        let base = Style::default().fg(palette.foreground).bg(palette.background);

        Block::default().style(base).render(area, buf);
        if area.height < 3 || area.width < 10 {
            return;
        }

        let center_y = area.y + area.height / 2;
        let lift = (face.slide() * SLIDE_ROWS).round() as u16;
        let readout_y = center_y.saturating_sub(lift).max(area.y);

        render_readout(face, base, Rect::new(area.x, readout_y, area.width, 1), buf);

        if face.clock_visible {
            let top = readout_y + 2;
            let bottom = area.bottom().saturating_sub(2);
            if top < bottom {
                let height = CLOCK_HEIGHT.min(bottom - top);
                let width = CLOCK_WIDTH.min(area.width);
                let x = area.x + (area.width - width) / 2;
                render_clock(face, palette, Rect::new(x, top, width, height), buf);
            }
        }

        let hint_y = area.bottom().saturating_sub(3);
        render_hint(self.app.state(), face, base, Rect::new(area.x, hint_y, area.width, 1), buf);

        let legend = Paragraph::new(Span::styled(
            legend_text(self.app.state()),
            base.add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        legend.render(
            Rect::new(area.x, area.bottom() - 1, area.width, 1),
            buf,
        );

        if self.app.is_confirming() {
            render_confirm_dialog(base, area, buf);
        }
    }
}

fn render_readout(face: &Face, base: Style, row: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled(
        face.main_text.clone(),
        base.add_modifier(Modifier::BOLD),
    )];
    if face.fraction_visible {
        spans.push(Span::styled(
            face.fraction_text.clone(),
            base.add_modifier(Modifier::DIM),
        ));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(row, buf);
}

fn render_clock(face: &Face, palette: Palette, area: Rect, buf: &mut Buffer) {
    let (x, y) = face.hand_direction();
    Canvas::default()
        .marker(Marker::Braille)
        .background_color(palette.background)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 0.95,
                color: palette.foreground,
            });
            ctx.draw(&HandLine {
                x1: 0.0,
                y1: 0.0,
                x2: x * 0.8,
                y2: y * 0.8,
                color: palette.foreground,
            });
        })
        .render(area, buf);
}

fn render_hint(state: TimerState, face: &Face, base: Style, row: Rect, buf: &mut Buffer) {
    let text = if face.shake_visible && state == TimerState::Stopped {
        "press r to reset"
    } else if face.pulse_visible && face.pulse_bright() {
        match state {
            TimerState::Running => "press space to stop",
            _ => "press space to start",
        }
    } else {
        return;
    };

    let offset = if face.shake_visible { face.shake_offset() } else { 0 };
    let x = (i32::from(row.x) + i32::from(offset)).clamp(0, i32::from(u16::MAX)) as u16;
    let row = Rect::new(x, row.y, row.width, row.height).intersection(buf.area);

    Paragraph::new(Span::styled(text, base.add_modifier(Modifier::BOLD)))
        .alignment(Alignment::Center)
        .render(row, buf);
}

fn render_confirm_dialog(base: Style, area: Rect, buf: &mut Buffer) {
    let width = DIALOG_WIDTH.min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);
    let dialog = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(dialog, buf);
    Paragraph::new(vec![
        Line::from("Do you want to reset the timer?"),
        Line::from(""),
        Line::from(Span::styled(
            "(y) Reset   (n) Do nothing",
            base.add_modifier(Modifier::BOLD),
        )),
    ])
    .style(base)
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Reset"))
    .render(dialog, buf);
}

pub fn legend_text(state: TimerState) -> &'static str {
    match state {
        TimerState::Idle => "(space) start / (q)uit",
        TimerState::Running => "(space) stop / (q)uit",
        TimerState::Stopped => "(space) resume / (r)eset / (q)uit",
    }
}
