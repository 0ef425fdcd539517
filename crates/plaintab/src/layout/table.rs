//! Paginated rendering.
//!
//! A [`Table`] ties a [`ColumnSet`] to a [`Page`] and framing options. Each
//! column page from width negotiation is printed in turn; within a column
//! page, row groups are packed greedily into physical pages that each repeat
//! the title, header, rules and footnotes. A group is never split across
//! physical pages, and the first group on a page prints its full label path.

use std::io::Write;

use tracing::{debug, warn};

use crate::config::{ReportConfig, TableOptions};
use crate::error::Result;
use crate::types::{Align, CellRecord};

use super::cell::TextCell;
use super::column::Column;
use super::columns::ColumnSet;
use super::page::Page;
use super::resolve::{ColumnLayout, ColumnPage};
use super::rows::{Row, RowGroup};

/// Page separator between physical pages.
pub const FORM_FEED: char = '\x0C';

/// A row group as placed on one physical page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedGroup {
    /// Index into [`Table::groups`].
    pub group: usize,
    /// First label level printed on this page.
    pub print_from: usize,
    /// Printed lines, label lines and blank spacing included.
    pub lines: usize,
}

/// One printed page: a column page and the row groups that fit on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalPage {
    /// Index into the column layout's pages.
    pub column_page: usize,
    pub groups: Vec<PlacedGroup>,
}

/// Everything about a column page that does not depend on the rows.
struct Frame {
    columns: Vec<Column>,
    /// Position of the column group labels print in.
    label_slot: usize,
    header: Vec<String>,
    /// Lines per page taken by everything except row groups.
    overhead: usize,
}

/// A laid out report ready to print.
#[derive(Clone, Debug)]
pub struct Table {
    columns: ColumnSet,
    page: Page,
    options: TableOptions,
    layout: ColumnLayout,
    groups: Vec<RowGroup>,
}

impl Table {
    /// Negotiate column widths for `page` and group the rows.
    pub fn new(columns: ColumnSet, page: Page, options: TableOptions) -> Self {
        let layout = columns.layout(page.linesize());
        let groups = columns.groups();
        debug!(
            column_pages = layout.len(),
            groups = groups.len(),
            rows = columns.row_count(),
            "table laid out"
        );
        Table {
            columns,
            page,
            options,
            layout,
            groups,
        }
    }

    /// Build columns from `config` and `records`, then lay them out.
    pub fn from_config<I>(config: &ReportConfig, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let columns = ColumnSet::from_config(&config.columns, records)?;
        Ok(Table::new(columns, config.page, config.table.clone()))
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn groups(&self) -> &[RowGroup] {
        &self.groups
    }

    /// Whether some column page is wider than the line.
    pub fn has_overflow(&self) -> bool {
        self.layout.has_overflow()
    }

    fn rule(&self) -> String {
        self.options
            .rule_char
            .to_string()
            .repeat(self.page.linesize())
    }

    /// Wrap a full-width block of text such as the title or a footnote.
    fn block(&self, text: &str, align: Align) -> Vec<String> {
        let mut cell = TextCell::new(text).with_split(self.options.split.clone());
        cell.set_width(self.page.linesize());
        cell.set_align(align);
        let lines = cell.lines();
        (0..lines.len())
            .map(|index| {
                let mut line = String::new();
                cell.write_line(&lines, index, &mut line);
                line.trim_end().to_string()
            })
            .collect()
    }

    fn title_lines(&self) -> Vec<String> {
        match self.options.title.as_deref() {
            Some(title) if !title.trim().is_empty() => self.block(title, self.options.title_align),
            _ => Vec::new(),
        }
    }

    fn footnote_lines(&self) -> Vec<String> {
        self.options
            .footnotes
            .iter()
            .flat_map(|note| self.block(note.text(), note.align()))
            .collect()
    }

    fn frame(&self, page: &ColumnPage, title: usize, footnotes: usize) -> Frame {
        let columns = self.columns.page_columns(page);
        let label_slot = self
            .columns
            .label_column()
            .and_then(|key| columns.iter().position(|c| c.key() == key))
            .unwrap_or(0);

        let mut header = Vec::new();
        if self.options.display_header {
            Row::header(&columns).render_into(&mut header);
        }

        let options = &self.options;
        let overhead = title
            + usize::from(title > 0)
            + usize::from(!options.display_header || options.before_header_line)
            + header.len()
            + usize::from(options.display_header && options.after_header_line)
            + 1
            + footnotes;

        Frame {
            columns,
            label_slot,
            header,
            overhead,
        }
    }

    fn frames(&self) -> Vec<Frame> {
        let title = self.title_lines().len();
        let footnotes = self.footnote_lines().len();
        self.layout
            .pages()
            .iter()
            .map(|page| self.frame(page, title, footnotes))
            .collect()
    }

    /// Lines `group` prints on `frame` starting from label level `from`.
    fn group_lines(&self, frame: &Frame, group: &RowGroup, from: usize) -> usize {
        let spacer = usize::from(self.options.double_spaced);
        let labels: usize = group
            .label()
            .levels_from(from)
            .map(|(level, text)| {
                Row::label(text, level, frame.label_slot, &frame.columns).line_count() + spacer
            })
            .sum();
        let rows: usize = group
            .rows()
            .iter()
            .map(|key| Row::body(key, &frame.columns).line_count() + spacer)
            .sum();
        labels + rows
    }

    fn paginate_frames(&self, frames: &[Frame]) -> Vec<PhysicalPage> {
        let mut pages = Vec::new();

        for (column_page, frame) in frames.iter().enumerate() {
            let capacity = self.page.pagesize().saturating_sub(frame.overhead);
            let mut remaining = capacity;
            let mut placed: Vec<PlacedGroup> = Vec::new();

            for (index, group) in self.groups.iter().enumerate() {
                let from = if placed.is_empty() {
                    0
                } else {
                    group.label().print_from()
                };
                let lines = self.group_lines(frame, group, from);

                if !placed.is_empty() && lines > remaining {
                    pages.push(PhysicalPage {
                        column_page,
                        groups: std::mem::take(&mut placed),
                    });
                    remaining = capacity;
                    // A new page restarts the label path from the top.
                    let lines = self.group_lines(frame, group, 0);
                    self.place(&mut placed, &mut remaining, index, 0, lines);
                } else {
                    self.place(&mut placed, &mut remaining, index, from, lines);
                }
            }

            pages.push(PhysicalPage {
                column_page,
                groups: placed,
            });
        }

        pages
    }

    fn place(
        &self,
        placed: &mut Vec<PlacedGroup>,
        remaining: &mut usize,
        group: usize,
        print_from: usize,
        lines: usize,
    ) {
        if lines > *remaining {
            warn!(
                group,
                lines,
                available = *remaining,
                pagesize = self.page.pagesize(),
                "row group does not fit on a page; printing it anyway"
            );
        }
        *remaining = remaining.saturating_sub(lines);
        placed.push(PlacedGroup {
            group,
            print_from,
            lines,
        });
    }

    /// Assign row groups to physical pages, column page by column page.
    ///
    /// Every column page yields at least one physical page, even with no
    /// rows, so the header and rules always print.
    pub fn paginate(&self) -> Vec<PhysicalPage> {
        self.paginate_frames(&self.frames())
    }

    fn render_page(
        &self,
        frame: &Frame,
        page: &PhysicalPage,
        title: &[String],
        footnotes: &[String],
    ) -> Vec<String> {
        let options = &self.options;
        let rule = self.rule();
        let mut out = Vec::new();

        if !title.is_empty() {
            out.extend_from_slice(title);
            out.push(String::new());
        }
        if !options.display_header || options.before_header_line {
            out.push(rule.clone());
        }
        if options.display_header {
            out.extend_from_slice(&frame.header);
            if options.after_header_line {
                out.push(rule.clone());
            }
        }

        for placed in &page.groups {
            let Some(group) = self.groups.get(placed.group) else {
                continue;
            };
            for (level, text) in group.label().levels_from(placed.print_from) {
                Row::label(text, level, frame.label_slot, &frame.columns).render_into(&mut out);
                if options.double_spaced {
                    out.push(String::new());
                }
            }
            for key in group.rows() {
                Row::body(key, &frame.columns).render_into(&mut out);
                if options.double_spaced {
                    out.push(String::new());
                }
            }
        }

        out.push(rule);
        out.extend_from_slice(footnotes);
        out
    }

    /// The printed lines of every physical page.
    pub fn render_pages(&self) -> Vec<Vec<String>> {
        let frames = self.frames();
        let title = self.title_lines();
        let footnotes = self.footnote_lines();
        self.paginate_frames(&frames)
            .iter()
            .filter_map(|page| {
                frames
                    .get(page.column_page)
                    .map(|frame| self.render_page(frame, page, &title, &footnotes))
            })
            .collect()
    }

    /// The whole report: every line ends in a newline and physical pages are
    /// separated by a form feed.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.render_pages().iter().enumerate() {
            if index > 0 {
                out.push(FORM_FEED);
            }
            for line in page {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Write the rendered report to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()?;
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::types::RowKey;
    use crate::util::display_width;
    use proptest::prelude::*;

    fn arb_cells() -> impl Strategy<Value = Vec<CellRecord>> {
        let text = proptest::collection::vec("[a-z]{1,4}", 1..4).prop_map(|words| words.join(" "));
        proptest::collection::vec((0usize..5, 0u32..8, text), 1..30).prop_map(|cells| {
            cells
                .into_iter()
                .map(|(column, row, text)| {
                    CellRecord::new(text, format!("c{}", column), RowKey::new([row]))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn rendered_lines_fit_the_page_width(cells in arb_cells(), linesize in 8usize..60) {
            let set = ColumnSet::builder().min_width(4usize).cells(cells).build().unwrap();
            let table = Table::new(set, Page::new(linesize, 50).unwrap(), TableOptions::new());
            prop_assert!(!table.has_overflow());
            for page in table.render_pages() {
                for line in page {
                    prop_assert!(display_width(&line) <= linesize, "{:?}", line);
                }
            }
        }

        #[test]
        fn every_group_prints_once_per_column_page(
            sizes in proptest::collection::vec(1usize..4, 0..12),
            pagesize in 5usize..30,
        ) {
            let mut builder = ColumnSet::builder().wrap(false);
            let mut key = 0u32;
            for (group, size) in sizes.iter().enumerate() {
                for _ in 0..*size {
                    key += 1;
                    builder = builder.cell(
                        CellRecord::new("v", "stats", RowKey::new([key]))
                            .label([format!("G{}", group / 3), format!("S{}", group)]),
                    );
                }
            }
            let table = Table::new(
                builder.build().unwrap(),
                Page::new(20, pagesize).unwrap(),
                TableOptions::new(),
            );

            let pages = table.paginate();
            let printed: Vec<usize> = pages
                .iter()
                .filter(|p| p.column_page == 0)
                .flat_map(|p| p.groups.iter().map(|g| g.group))
                .collect();
            prop_assert_eq!(printed, (0..sizes.len()).collect::<Vec<_>>());

            let rendered = table.render_pages();
            for (page, lines) in pages.iter().zip(&rendered) {
                prop_assert_eq!(page.groups.first().map_or(0, |g| g.print_from), 0);
                prop_assert!(lines.len() <= pagesize || page.groups.len() == 1);
            }
        }
    }
}
