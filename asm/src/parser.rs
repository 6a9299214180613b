use arch::{Cmd, Info, Status, Trans};

use crate::error::Error;

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Case(String),
    Info(Info),
    Cmd(Cmd),
    Trans(Trans),
}

impl Stmt {
    /// Parses one source line. `line` is 1-based. Lines that start with none
    /// of the known prefixes yield `None`.
    pub fn parse(raw: &str, line: usize) -> Result<Option<Stmt>, Error> {
        let code = raw.trim();
        if code.starts_with("case") {
            let name = case_name(code).ok_or(Error::MissingName(line))?;
            Ok(Some(Stmt::Case(name.to_string())))
        } else if code.starts_with("nb_trans") {
            Ok(Some(Stmt::Info(parse_info(code, line)?)))
        } else if code.starts_with("cmd") {
            Ok(Some(Stmt::Cmd(parse_cmd(code, line)?)))
        } else if code.starts_with("op{") {
            Ok(Some(Stmt::Trans(parse_trans(code, line)?)))
        } else {
            Ok(None)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Case(_) => "case",
            Stmt::Info(_) => "info",
            Stmt::Cmd(_) => "command",
            Stmt::Trans(_) => "transition",
        }
    }
}

fn parse_info(code: &str, line: usize) -> Result<Info, Error> {
    let mut info = Info::default();
    for (key, field) in [
        ("nb_trans", &mut info.nb_trans),
        ("cmdEn", &mut info.cmd_en),
        ("cmdExtEn", &mut info.cmd_ext_en),
        ("timeOutEn", &mut info.timeout_en),
        ("sleepEn", &mut info.sleep_en),
        ("timeOutVal", &mut info.timeout_val),
    ] {
        let value = number_after(code, key).ok_or(Error::Syntax(key.to_string(), line))?;
        field.set_str(value).map_err(Error::overflow(line))?;
    }

    let list = list_after(code, "dspEn", |c| c == ' ' || c.is_ascii_digit())
        .ok_or(Error::Syntax("dspEn".to_string(), line))?;
    let bits = list
        .split_whitespace()
        .map(|bit| match bit {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(Error::Syntax(format!("dspEn bit {}", bit), line)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    info.dsp_en.set_bits(bits).map_err(Error::overflow(line))?;
    Ok(info)
}

fn parse_cmd(code: &str, line: usize) -> Result<Cmd, Error> {
    let mut cmd = Cmd::default();
    let opcode = number_after(code, "cmd").ok_or(Error::Syntax("cmd".to_string(), line))?;
    cmd.opcode.set_str(opcode).map_err(Error::overflow(line))?;

    let list = list_after(code, "param", |c| {
        c == ' ' || c == ',' || c == '-' || c.is_ascii_digit()
    })
    .ok_or(Error::Syntax("param".to_string(), line))?;
    let params: Vec<&str> = list
        .split(|c| c == ' ' || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    if params.len() != 3 || !params.iter().all(|p| is_decimal(p)) {
        return Err(Error::Syntax(format!("param [{}]", list.trim()), line));
    }
    for (field, value) in [&mut cmd.param2, &mut cmd.param1, &mut cmd.param0]
        .into_iter()
        .zip(params)
    {
        field.set_str(value).map_err(Error::overflow(line))?;
    }
    Ok(cmd)
}

fn parse_trans(code: &str, line: usize) -> Result<Trans, Error> {
    let mut trans = Trans::default();
    let symbols = quoted_values(code);
    let [cond1, cond2, cond3, target] = symbols.as_slice() else {
        return Err(Error::Syntax("transition".to_string(), line));
    };
    for (field, name) in [
        (&mut trans.cond1, cond1),
        (&mut trans.cond2, cond2),
        (&mut trans.cond3, cond3),
    ] {
        let status =
            Status::parse(name).map_err(|_| Error::UnknownStatus(name.to_string(), line))?;
        field
            .set(status.index() as u64)
            .map_err(Error::overflow(line))?;
    }
    trans.label = target.to_string();

    for (key, field) in [
        ("pathComb", &mut trans.path_comb),
        ("opComb", &mut trans.op_comb),
    ] {
        let value = number_after(code, key).ok_or(Error::Syntax(key.to_string(), line))?;
        field.set_str(value).map_err(Error::overflow(line))?;
    }
    Ok(trans)
}

// ----------------------------------------------------------------------------
// Field extraction

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Text following the first occurrence of `key`.
fn after<'a>(code: &'a str, key: &str) -> Option<&'a str> {
    code.find(key).map(|idx| &code[idx + key.len()..])
}

/// Each suffix of `text` that directly follows an `=` and its spaces.
fn assignments(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('=')
        .map(move |(idx, _)| text[idx + 1..].trim_start_matches(' '))
}

/// `key ... = 123`: the first `=` after `key` that is followed by digits.
fn number_after<'a>(code: &'a str, key: &str) -> Option<&'a str> {
    assignments(after(code, key)?).find_map(|rest| {
        let len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        (len > 0).then(|| &rest[..len])
    })
}

/// `key ... = [a b c]`: the bracket content after the first matching `=`.
fn list_after<'a>(code: &'a str, key: &str, allowed: impl Fn(char) -> bool) -> Option<&'a str> {
    assignments(after(code, key)?).find_map(|rest| {
        let body = rest.strip_prefix('[')?;
        let len = body.find(|c: char| !allowed(c)).unwrap_or(body.len());
        (len > 0 && body[len..].starts_with(']')).then(|| &body[..len])
    })
}

/// Every `= 'symbol'` in the line, left to right.
fn quoted_values(code: &str) -> Vec<&str> {
    assignments(code)
        .filter_map(|rest| quoted_word(rest.strip_prefix('\'')?))
        .collect()
}

/// Word characters up to a closing quote.
fn quoted_word(body: &str) -> Option<&str> {
    let len = body.find(|c: char| !is_word(c)).unwrap_or(body.len());
    (len > 0 && body[len..].starts_with('\'')).then(|| &body[..len])
}

/// First `'name'` in a `case` line.
fn case_name(code: &str) -> Option<&str> {
    code.match_indices('\'')
        .find_map(|(idx, _)| quoted_word(&code[idx + 1..]))
}
