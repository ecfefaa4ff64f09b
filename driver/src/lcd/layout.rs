//! Fitting text onto display rows.
//!
//! [layout] is pure: it decides what goes where, and [crate::lcd::Lcd::show_text] writes it out.

use crate::lcd::DisplayGeometry;
use bitvec::vec::BitVec;

/// Replaces the last visible character when text did not fit.
pub const ELLIPSIS: char = '~';

/// A set of display rows.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RowSelection {
    rows: BitVec<u8>,
}

impl RowSelection {
    /// No rows. Text shown with it is written wherever the cursor is.
    pub fn none() -> Self {
        RowSelection::default()
    }

    pub fn row(row: usize) -> Self {
        let mut selection = RowSelection::none();
        selection.insert(row);
        selection
    }

    /// Every row of `geometry`.
    pub fn all(geometry: &DisplayGeometry) -> Self {
        RowSelection {
            rows: BitVec::repeat(true, geometry.rows()),
        }
    }

    pub fn insert(&mut self, row: usize) {
        if row >= self.rows.len() {
            self.rows.resize(row + 1, false);
        }
        self.rows.set(row, true);
    }

    pub fn remove(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.set(row, false);
        }
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|bit| *bit)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.not_any()
    }

    /// Lowest selected row.
    pub fn first(&self) -> Option<usize> {
        self.rows.first_one()
    }

    /// Highest selected row.
    pub fn last(&self) -> Option<usize> {
        self.rows.last_one()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter_ones()
    }
}

impl FromIterator<usize> for RowSelection {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut selection = RowSelection::none();
        for row in iter {
            selection.insert(row);
        }
        selection
    }
}

impl<const N: usize> From<[usize; N]> for RowSelection {
    fn from(rows: [usize; N]) -> Self {
        rows.into_iter().collect()
    }
}

/// What to do with text that does not exactly fill the selected rows.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ShowOptions {
    /// Mark truncated text with [ELLIPSIS] in the last cell.
    pub ellipsis_if_overflow: bool,
    /// Fill the rest of the selected rows with spaces when text runs out.
    pub blank_pad: bool,
}

impl ShowOptions {
    pub fn ellipsis() -> Self {
        ShowOptions {
            ellipsis_if_overflow: true,
            blank_pad: false,
        }
    }

    pub fn blank_pad() -> Self {
        ShowOptions {
            ellipsis_if_overflow: false,
            blank_pad: true,
        }
    }

    pub fn with_ellipsis(mut self, on: bool) -> Self {
        self.ellipsis_if_overflow = on;
        self
    }

    pub fn with_blank_pad(mut self, on: bool) -> Self {
        self.blank_pad = on;
        self
    }
}

/// One piece of laid-out text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayoutLine {
    /// Row to write to, or `None` to write at the cursor.
    pub row: Option<usize>,
    pub text: String,
}

/// Splits `text` over the rows from the lowest to the highest selected one.
///
/// Rows between the two ends are filled too, even if not selected. Each `char` takes one cell.
/// Text that does not fit is dropped, or marked with [ELLIPSIS] if asked to. Text that runs out
/// early is padded with spaces up to the highest selected row when [ShowOptions::blank_pad] is set.
///
/// Empty text lays out to nothing. With no rows selected the whole text comes back as one line
/// without a row.
pub fn layout(
    text: &str,
    selection: &RowSelection,
    options: ShowOptions,
    geometry: &DisplayGeometry,
) -> Vec<LayoutLine> {
    if text.is_empty() {
        return Vec::new();
    }

    let (Some(start_row), Some(end_row)) = (selection.first(), selection.last()) else {
        return vec![LayoutLine {
            row: None,
            text: text.to_string(),
        }];
    };

    let columns = geometry.columns();
    let mut chars = text.chars().peekable();
    let mut lines = Vec::with_capacity(end_row - start_row + 1);

    for row in start_row..=end_row {
        if chars.peek().is_none() {
            break;
        }
        lines.push(LayoutLine {
            row: Some(row),
            text: chars.by_ref().take(columns).collect(),
        });
    }

    let overflowed = chars.peek().is_some();
    let Some(last) = lines.last_mut() else {
        return lines;
    };

    if overflowed {
        if options.ellipsis_if_overflow {
            last.text.pop();
            last.text.push(ELLIPSIS);
        }
    } else if options.blank_pad {
        let used = last.text.chars().count();
        last.text.extend(std::iter::repeat_n(' ', columns - used));

        let next_row = last.row.map_or(end_row, |row| row + 1);
        for row in next_row..=end_row {
            lines.push(LayoutLine {
                row: Some(row),
                text: " ".repeat(columns),
            });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(lines: &[LayoutLine]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn short_text_on_one_row() {
        let lines = layout(
            "Hello",
            &RowSelection::row(0),
            ShowOptions::default(),
            &DisplayGeometry::lcd_16x2(),
        );
        assert_eq!(
            lines,
            vec![LayoutLine {
                row: Some(0),
                text: "Hello".to_string()
            }]
        );
    }

    #[test]
    fn overflow_gets_an_ellipsis() {
        let lines = layout(
            "This text is too long for one row",
            &RowSelection::row(0),
            ShowOptions::ellipsis(),
            &DisplayGeometry::lcd_16x2(),
        );
        assert_eq!(texts(&lines), vec!["This text is to~"]);
    }

    #[test]
    fn overflow_is_dropped_without_ellipsis() {
        let lines = layout(
            "This text is too long for one row",
            &RowSelection::row(1),
            ShowOptions::default(),
            &DisplayGeometry::lcd_16x2(),
        );
        assert_eq!(texts(&lines), vec!["This text is too"]);
        assert_eq!(lines[0].row, Some(1));
    }

    #[test]
    fn blank_pad_fills_every_selected_row() {
        let lines = layout(
            "Hi",
            &RowSelection::from([0, 1]),
            ShowOptions::blank_pad(),
            &DisplayGeometry::lcd_16x2(),
        );
        assert_eq!(
            texts(&lines),
            vec!["Hi              ", "                "]
        );
        assert_eq!(lines[1].row, Some(1));
    }

    #[test]
    fn wraps_over_rows_between_the_ends() {
        let lines = layout(
            "0123456789abcdefghijklmnopqrstuvwxyz",
            &RowSelection::from([1, 3]),
            ShowOptions::default(),
            &DisplayGeometry::lcd_20x4(),
        );
        assert_eq!(texts(&lines), vec!["0123456789abcdefghij", "klmnopqrstuvwxyz"]);
        assert_eq!(lines[0].row, Some(1));
        assert_eq!(lines[1].row, Some(2));
    }

    #[test]
    fn empty_text_lays_out_to_nothing() {
        let lines = layout(
            "",
            &RowSelection::from([0, 1]),
            ShowOptions::blank_pad(),
            &DisplayGeometry::lcd_16x2(),
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn no_rows_means_one_unpositioned_line() {
        let text = "Way longer than the display is wide";
        let lines = layout(
            text,
            &RowSelection::none(),
            ShowOptions::ellipsis(),
            &DisplayGeometry::lcd_16x2(),
        );
        assert_eq!(
            lines,
            vec![LayoutLine {
                row: None,
                text: text.to_string()
            }]
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let lines = layout(
            "żółw",
            &RowSelection::row(0),
            ShowOptions::blank_pad(),
            &DisplayGeometry::new(8, 1).unwrap(),
        );
        assert_eq!(texts(&lines), vec!["żółw    "]);
    }

    #[test]
    fn selection_grows_as_needed() {
        let mut selection = RowSelection::none();
        assert!(selection.is_empty());

        selection.insert(6);
        selection.insert(2);
        assert_eq!(selection.first(), Some(2));
        assert_eq!(selection.last(), Some(6));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![2, 6]);

        selection.remove(6);
        assert_eq!(selection.last(), Some(2));
        assert!(!selection.contains(6));
        assert!(!selection.contains(100));
    }

    fn geometry() -> impl Strategy<Value = DisplayGeometry> {
        prop_oneof![
            (1usize..=20).prop_map(|columns| DisplayGeometry::new(columns, 1).unwrap()),
            (1usize..=20).prop_map(|columns| DisplayGeometry::new(columns, 2).unwrap()),
            Just(DisplayGeometry::lcd_20x4()),
        ]
    }

    fn selection_for(geometry: &DisplayGeometry, bits: u8) -> RowSelection {
        (0..geometry.rows()).filter(|row| bits & (1 << row) != 0).collect()
    }

    proptest! {
        #[test]
        fn lines_never_exceed_the_display(
            text in "\\PC{0,100}",
            geometry in geometry(),
            bits in 0u8..16,
            ellipsis in any::<bool>(),
            blank_pad in any::<bool>(),
        ) {
            let selection = selection_for(&geometry, bits);
            prop_assume!(!selection.is_empty());
            let options = ShowOptions { ellipsis_if_overflow: ellipsis, blank_pad };

            let lines = layout(&text, &selection, options, &geometry);
            let start = selection.first().unwrap();
            let end = selection.last().unwrap();

            prop_assert!(lines.len() <= end - start + 1);
            for (index, line) in lines.iter().enumerate() {
                prop_assert_eq!(line.row, Some(start + index));
                prop_assert!(line.text.chars().count() <= geometry.columns());
            }
        }

        #[test]
        fn plain_layout_is_a_prefix_of_the_text(
            text in "\\PC{0,100}",
            geometry in geometry(),
            bits in 1u8..16,
        ) {
            let selection = selection_for(&geometry, bits);
            prop_assume!(!selection.is_empty());

            let lines = layout(&text, &selection, ShowOptions::default(), &geometry);
            let joined: String = lines.iter().map(|line| line.text.as_str()).collect();

            prop_assert!(text.starts_with(&joined));
            let span = selection.last().unwrap() - selection.first().unwrap() + 1;
            let expected = text.chars().count().min(span * geometry.columns());
            prop_assert_eq!(joined.chars().count(), expected);
        }

        #[test]
        fn blank_pad_covers_the_whole_span_when_text_fits(
            text in "[a-z ]{1,20}",
            bits in 1u8..16,
        ) {
            let geometry = DisplayGeometry::lcd_20x4();
            let selection = selection_for(&geometry, bits);

            let lines = layout(&text, &selection, ShowOptions::blank_pad(), &geometry);
            let span = selection.last().unwrap() - selection.first().unwrap() + 1;

            prop_assert_eq!(lines.len(), span);
            prop_assert!(lines.iter().all(|line| line.text.chars().count() == 20));
        }

        #[test]
        fn ellipsis_marks_every_overflow(
            text in "[a-z]{33,60}",
        ) {
            let geometry = DisplayGeometry::lcd_16x2();
            let lines = layout(&text, &RowSelection::from([0, 1]), ShowOptions::ellipsis(), &geometry);

            prop_assert_eq!(lines.len(), 2);
            prop_assert_eq!(lines[1].text.chars().count(), 16);
            prop_assert!(lines[1].text.ends_with(ELLIPSIS));
        }
    }
}
