use arch::{sig, WORD_BITS};
use color_print::cformat;

use crate::compiler::{visit_states, Visitor};
use crate::state::State;

/// Assembled ram image: state words, zero padding, and the signature as the
/// last word.
#[derive(Debug, Clone)]
pub struct Image {
    words: Vec<u32>,
    used: usize,
    states: Vec<State>,
}

impl Image {
    /// `states` must already be resolved, checked, and fit in `ram - 1` words.
    pub(crate) fn assemble(states: Vec<State>, ram: usize) -> Self {
        let mut words: Vec<u32> = states
            .iter()
            .flat_map(|state| state.words().into_iter().map(|(_, word)| word))
            .collect();
        let used = words.len();
        words.resize(ram.saturating_sub(1), 0);
        words.push(sig::signature(&words));
        Image {
            words,
            used,
            states,
        }
    }

    /// Every word including the signature.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Words written by states.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    pub fn signature(&self) -> u32 {
        self.words.last().copied().unwrap_or(sig::SEED)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The whole image as a string of `0`/`1`, address order, MSB first.
    pub fn bits(&self) -> String {
        self.words
            .iter()
            .map(|word| format!("{:0width$b}", word, width = WORD_BITS))
            .collect()
    }

    pub fn for_each_state<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visit_states(&self.states, visitor);
    }
}

impl Image {
    /// Colored per-word listing of the image.
    pub fn cformat(&self) -> String {
        let mut lines = vec![];
        for state in &self.states {
            for (offset, (slot, word)) in state.words().into_iter().enumerate() {
                lines.push(cformat!(
                    "| <green>{:03X}</> | {:08x} | <c>{:<24}</> | {}",
                    state.addr + offset,
                    word,
                    state.name,
                    state.cformat(slot)
                ));
            }
        }
        if self.used + 1 < self.capacity() {
            lines.push(cformat!(
                "| <green>{:03X}</> | 00000000 | ... {} words of padding",
                self.used,
                self.capacity() - 1 - self.used
            ));
        }
        lines.push(cformat!(
            "| <green>{:03X}</> | <r,s>{:08x}</> | signature",
            self.capacity() - 1,
            self.signature()
        ));
        lines.join("\n")
    }
}
