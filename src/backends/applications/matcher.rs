/// One compiled step of a fuzzy pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// Skip forward lazily until this character is found. The step owns the
    /// matched character plus any skipped text before the next step's match.
    SkipTo(char),
    /// The final character of the query, owning exactly one character.
    Anchor(char),
}

impl Step {
    fn target(self) -> char {
        match self {
            Step::SkipTo(c) | Step::Anchor(c) => c,
        }
    }
}

/// How a matched name is carved up, as character counts: the unmatched
/// prefix first, then one span per query character. Spans cover the name
/// from its start up to the last matched character; any tail after that is
/// not represented here.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSpans {
    lengths: Vec<usize>,
}

impl MatchSpans {
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }
}

/// A subsequence pattern compiled from one lower-cased query: every query
/// character must occur in the name in order, with the last one anchoring
/// the match.
///
/// The unmatched prefix is kept as long as possible (the match starts at the
/// latest viable position) while every later step takes the shortest
/// possible span. That keeps the highlighted region tight: "ffx" against
/// "foo firefox" matches inside "firefox" instead of stretching from the
/// `f` of "foo".
pub struct FuzzyPattern {
    steps: Vec<Step>,
}

impl FuzzyPattern {
    /// `None` when the query has no characters to compile.
    pub fn new(query: &str) -> Option<Self> {
        let chars: Vec<char> = query.chars().collect();
        let (&last, head) = chars.split_last()?;
        let mut steps: Vec<Step> = head.iter().map(|&c| Step::SkipTo(c)).collect();
        steps.push(Step::Anchor(last));
        Some(FuzzyPattern { steps })
    }

    /// Test `name` (case-folded one character at a time, so span lengths
    /// still line up with the original) and carve it into spans. `None` when
    /// the query is not a subsequence of the name.
    pub fn spans(&self, name: &str) -> Option<MatchSpans> {
        let hay: Vec<char> = name
            .chars()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
            .collect();
        let positions = self.positions(&hay)?;

        let mut lengths = Vec::with_capacity(positions.len() + 1);
        lengths.push(positions[0]);
        for pair in positions.windows(2) {
            lengths.push(pair[1] - pair[0]);
        }
        lengths.push(1);
        Some(MatchSpans { lengths })
    }

    /// One name index per step, in order. A right-to-left scan first pins
    /// the latest start that still leaves room for the remaining steps; a
    /// left-to-right scan then gives every later step its earliest position.
    fn positions(&self, hay: &[char]) -> Option<Vec<usize>> {
        let mut end = hay.len();
        for step in self.steps.iter().rev() {
            end = hay[..end].iter().rposition(|&c| c == step.target())?;
        }

        let mut positions = Vec::with_capacity(self.steps.len());
        positions.push(end);
        let mut from = end + 1;
        for step in &self.steps[1..] {
            let offset = hay[from..].iter().position(|&c| c == step.target())?;
            positions.push(from + offset);
            from += offset + 1;
        }
        Some(positions)
    }
}
