use std::io::Write;

use clap::Args;
use jazz_wheel_core::{
    Catalog, Complexity, Filters, JazzStandard, JazzWheelError, KeyValueStore,
    NotationPreference, Result, ScaleSheet, SelectionMode, Session, Style, Tempo, Wheel,
};
use rand::Rng;

const NO_MATCH: &str = "No standard matches the current filters.";

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Style to toggle (e.g. `Swing`, `Bossa/Latin`).
    #[arg(long)]
    pub style: Vec<Style>,
    /// Tempo to toggle (`Lent`, `Medium`, `Rapide`).
    #[arg(long)]
    pub tempo: Vec<Tempo>,
    /// Complexity to toggle (`1 gamme`, `plusieurs gammes`).
    #[arg(long)]
    pub complexity: Vec<Complexity>,
    /// Clear all filters before applying the toggles.
    #[arg(long)]
    pub reset: bool,
}

/// Catalog plus the preference session the stateful commands operate on.
pub struct App<S> {
    catalog: Catalog,
    session: Session<S>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(catalog: Catalog, session: Session<S>) -> Self {
        Self { catalog, session }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn list(&self, out: &mut impl Write) -> Result<()> {
        let visible = self.session.preferences().filters.apply(&self.catalog);
        if visible.is_empty() {
            writeln!(out, "{NO_MATCH}")?;
            return Ok(());
        }

        for standard in visible {
            writeln!(out, "{:<28} {}", standard.id, summary(standard))?;
        }
        Ok(())
    }

    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R, out: &mut impl Write) -> Result<()> {
        let wheel = Wheel::new(self.session.preferences().filters.apply(&self.catalog));
        tracing::info!(candidates = wheel.len(), "spinning the wheel");

        let Some(winner) = wheel.spin(rng) else {
            writeln!(out, "{NO_MATCH}")?;
            return Ok(());
        };

        self.session.select(winner, SelectionMode::Wheel)?;
        writeln!(out, "{}", winner.title)?;
        writeln!(out, "  {}", summary(winner))?;
        writeln!(out, "Run `jazz-wheel scales` to see the recommended scales.")?;
        Ok(())
    }

    pub fn select(&mut self, id: &str, out: &mut impl Write) -> Result<()> {
        let standard = self.catalog.require(id)?;
        self.session.select(standard, SelectionMode::Manual)?;
        let notation = self.session.preferences().notation;
        write!(out, "{}", ScaleSheet::for_standard(standard, notation))?;
        Ok(())
    }

    /// Shows the sheet for `id`, or for the remembered standard. A notation
    /// is only saved once the standard has been found.
    pub fn scales(
        &mut self,
        id: Option<&str>,
        notation: Option<NotationPreference>,
        out: &mut impl Write,
    ) -> Result<()> {
        let standard = match id {
            Some(id) => self.catalog.require(id)?,
            None => self.session.selected(&self.catalog).ok_or_else(|| {
                JazzWheelError::msg("no standard selected; run `spin` or `select <id>` first")
            })?,
        };

        if let Some(notation) = notation {
            self.session.set_notation(notation)?;
        }
        let notation = self.session.preferences().notation;
        write!(out, "{}", ScaleSheet::for_standard(standard, notation))?;
        Ok(())
    }

    pub fn back(&mut self) -> Result<()> {
        self.session.clear_selection()
    }

    pub fn filter(&mut self, args: FilterArgs, out: &mut impl Write) -> Result<()> {
        let mut filters = self.session.preferences().filters.clone();
        if args.reset {
            filters.reset();
        }
        for style in args.style {
            filters.toggle_style(style);
        }
        for tempo in args.tempo {
            filters.toggle_tempo(tempo);
        }
        for complexity in args.complexity {
            filters.toggle_complexity(complexity);
        }

        let matching = filters.apply(&self.catalog).len();
        write_filters(out, &filters)?;
        writeln!(out, "{matching} of {} standards match", self.catalog.len())?;
        self.session.set_filters(filters)
    }
}

fn write_filters(out: &mut impl Write, filters: &Filters) -> Result<()> {
    fn join<T: ToString>(values: &[T]) -> String {
        if values.is_empty() {
            "any".to_string()
        } else {
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    writeln!(out, "styles:     {}", join(&filters.styles))?;
    writeln!(out, "tempo:      {}", join(&filters.tempo))?;
    writeln!(out, "complexity: {}", join(&filters.complexity))?;
    Ok(())
}

fn summary(standard: &JazzStandard) -> String {
    let styles: Vec<&str> = standard.tags.styles.iter().map(|style| style.label()).collect();
    format!(
        "{} | {} | {} | {}",
        standard.title,
        styles.join(", "),
        standard.tags.tempo,
        standard.tags.complexity
    )
}
