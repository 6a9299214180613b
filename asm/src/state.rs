use arch::{Cmd, Info, Status, Trans};
use color_print::cformat;

use crate::diag::{Diagnostics, Issue};
use crate::error::Error;
use crate::ident::Idents;

/// Which record a word of a state holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Info,
    Cmd,
    Trans(usize),
}

/// One named state: info word, optional command word, then transitions.
#[derive(Debug, Clone)]
pub struct State {
    pub name: String,
    /// Line of the `case` statement.
    pub line: usize,
    /// Word address of the first record.
    pub addr: usize,
    pub info: Option<(Info, usize)>,
    pub cmd: Option<(Cmd, usize)>,
    pub trans: Vec<(Trans, usize)>,
}

impl State {
    pub fn new(name: String, line: usize, addr: usize) -> Self {
        State {
            name,
            line,
            addr,
            info: None,
            cmd: None,
            trans: vec![],
        }
    }

    pub fn set_info(&mut self, info: Info, line: usize) -> Result<(), Error> {
        if self.info.is_some() {
            return Err(Error::Duplicate("info", self.name.clone(), line));
        }
        self.info = Some((info, line));
        Ok(())
    }

    pub fn set_cmd(&mut self, cmd: Cmd, line: usize) -> Result<(), Error> {
        if self.cmd.is_some() {
            return Err(Error::Duplicate("command", self.name.clone(), line));
        }
        self.cmd = Some((cmd, line));
        Ok(())
    }

    pub fn push_trans(&mut self, trans: Trans, line: usize) {
        self.trans.push((trans, line));
    }

    /// Number of image words the state occupies.
    pub fn len(&self) -> usize {
        self.info.iter().count() + self.cmd.iter().count() + self.trans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Words in image order with the record each one came from.
    pub fn words(&self) -> Vec<(Slot, u32)> {
        let mut words = vec![];
        if let Some((info, _)) = &self.info {
            words.push((Slot::Info, info.to_bin()));
        }
        if let Some((cmd, _)) = &self.cmd {
            words.push((Slot::Cmd, cmd.to_bin()));
        }
        for (idx, (trans, _)) in self.trans.iter().enumerate() {
            words.push((Slot::Trans(idx), trans.to_bin()));
        }
        words
    }

    pub fn cformat(&self, slot: Slot) -> String {
        match slot {
            Slot::Info => self.info.as_ref().map(|(info, _)| info.cformat()),
            Slot::Cmd => self.cmd.as_ref().map(|(cmd, _)| cmd.cformat()),
            Slot::Trans(idx) => self.trans.get(idx).map(|(trans, _)| trans.cformat()),
        }
        .unwrap_or_else(|| cformat!("<r,s>??</>"))
    }
}

impl State {
    /// Rewrites every transition target from its label to a word address.
    pub fn resolve(&mut self, idents: &Idents, diags: &mut Diagnostics) {
        for (trans, line) in &mut self.trans {
            let Some(addr) = idents.get_addr(&trans.label) else {
                diags.push(Issue::UnresolvedTarget(trans.label.clone(), *line));
                continue;
            };
            if trans.target.set(addr as u64).is_err() {
                diags.push(Issue::TargetOverflow(trans.label.clone(), addr, *line));
            }
        }
    }

    pub fn check(&self, diags: &mut Diagnostics) {
        let Some((info, line)) = &self.info else {
            diags.push(Issue::MissingInfo(self.name.clone(), self.line));
            return;
        };
        let line = *line;

        if info.nb_trans.value() as usize != self.trans.len() {
            diags.push(Issue::TransCount(self.name.clone(), line));
        }

        if info.timeout_en.is_set() && info.timeout_val.value() == 0 {
            diags.push(Issue::TimeoutValue(self.name.clone(), line));
        }
        let uses_timeout = self
            .trans
            .iter()
            .any(|(trans, _)| trans.tests(Status::TimeOut));
        if info.timeout_en.is_set() != uses_timeout {
            diags.push(Issue::TimeoutUsage(self.name.clone(), self.line));
        }

        if info.cmd_en.is_set() != self.cmd.is_some() {
            diags.push(Issue::CmdEnable(self.name.clone(), line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trans(label: &str, cond: Status) -> Trans {
        let mut trans = Trans::default();
        trans.cond1.set(cond.index() as u64).unwrap();
        trans.label = label.to_string();
        trans
    }

    fn state(nb_trans: u64, cmd_en: u64, timeout: Option<u64>) -> State {
        let mut info = Info::default();
        info.nb_trans.set(nb_trans).unwrap();
        info.cmd_en.set(cmd_en).unwrap();
        if let Some(value) = timeout {
            info.timeout_en.set(1).unwrap();
            info.timeout_val.set(value).unwrap();
        }
        let mut state = State::new("s".into(), 1, 0);
        state.set_info(info, 2).unwrap();
        state
    }

    fn issues(state: &State) -> Vec<Issue> {
        let mut diags = Diagnostics::new();
        state.check(&mut diags);
        diags.issues().to_vec()
    }

    #[test]
    fn word_count() {
        let mut state = state(1, 1, None);
        assert_eq!(state.len(), 1);
        state.set_cmd(Cmd::default(), 3).unwrap();
        state.push_trans(trans("s", Status::True), 4);
        assert_eq!(state.len(), 3);
        assert_eq!(
            state.words().iter().map(|(slot, _)| *slot).collect::<Vec<_>>(),
            vec![Slot::Info, Slot::Cmd, Slot::Trans(0)]
        );
        assert!(!state.is_empty());
    }

    #[test]
    fn duplicate_records() {
        let mut state = state(0, 0, None);
        assert!(matches!(
            state.set_info(Info::default(), 5),
            Err(Error::Duplicate("info", _, 5))
        ));
        state.set_cmd(Cmd::default(), 6).unwrap();
        assert!(matches!(
            state.set_cmd(Cmd::default(), 7),
            Err(Error::Duplicate("command", _, 7))
        ));
    }

    #[test]
    fn consistent_state() {
        let mut state = state(1, 1, Some(10));
        state.set_cmd(Cmd::default(), 3).unwrap();
        state.push_trans(trans("s", Status::TimeOut), 4);
        assert_eq!(issues(&state), vec![]);
    }

    #[test]
    fn transition_count() {
        let state = state(2, 0, None);
        assert_eq!(issues(&state), vec![Issue::TransCount("s".into(), 2)]);
    }

    #[test]
    fn command_enable_both_ways() {
        let state_a = state(0, 1, None);
        assert_eq!(issues(&state_a), vec![Issue::CmdEnable("s".into(), 2)]);
        let mut state_b = state(0, 0, None);
        state_b.set_cmd(Cmd::default(), 3).unwrap();
        assert_eq!(issues(&state_b), vec![Issue::CmdEnable("s".into(), 2)]);
    }

    #[test]
    fn timeout_rules() {
        // enabled with zero value, and no timeout transition
        let state_a = state(0, 0, Some(0));
        assert_eq!(
            issues(&state_a),
            vec![
                Issue::TimeoutValue("s".into(), 2),
                Issue::TimeoutUsage("s".into(), 1)
            ]
        );
        // timeout transition without the enable bit
        let mut state_b = state(1, 0, None);
        state_b.push_trans(trans("s", Status::TimeOut), 3);
        assert_eq!(issues(&state_b), vec![Issue::TimeoutUsage("s".into(), 1)]);
    }

    #[test]
    fn missing_info() {
        let state = State::new("bare".into(), 9, 0);
        assert_eq!(issues(&state), vec![Issue::MissingInfo("bare".into(), 9)]);
    }

    #[test]
    fn resolve_targets() {
        let mut idents = Idents::new();
        idents.insert("near".into(), 1, 5);
        idents.insert("far".into(), 2, 600);
        let mut state = state(3, 0, None);
        state.push_trans(trans("near", Status::True), 3);
        state.push_trans(trans("far", Status::True), 4);
        state.push_trans(trans("nowhere", Status::True), 5);
        let mut diags = Diagnostics::new();
        state.resolve(&idents, &mut diags);
        assert_eq!(state.trans[0].0.target.value(), 5);
        assert_eq!(state.trans[1].0.target.value(), 0);
        assert_eq!(state.trans[2].0.target.value(), 0);
        assert_eq!(
            diags.issues(),
            &[
                Issue::TargetOverflow("far".into(), 600, 4),
                Issue::UnresolvedTarget("nowhere".into(), 5)
            ]
        );
    }
}
