use nom::{
    branch::alt,
    bytes::complete::{tag, take},
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map, opt},
    error::ErrorKind,
    sequence::preceded,
    IResult,
};

use crate::protocol::{InputId, Rejection, RelayId, Request, Switch, HARDCHECK};

// "$outNN" plus at least a two-byte state suffix
const RELAY_MIN_LEN: usize = 8;
// "$inNN"
const INPUT_MIN_LEN: usize = 5;

/// Classifies a command line. Every line maps to exactly one request.
pub fn parse(line: &str) -> Request {
    let parsed = alt((hardcheck, set_relay, read_input, analog))(line.as_bytes());
    match parsed {
        Ok((_, request)) => request,
        Err(_) => Request::Unknown,
    }
}

fn hardcheck(input: &[u8]) -> IResult<&[u8], Request> {
    map(all_consuming(tag(HARDCHECK)), |_| Request::HardCheck)(input)
}

fn analog(input: &[u8]) -> IResult<&[u8], Request> {
    map(all_consuming(tag("$ad")), |_| Request::SampleAnalog)(input)
}

// $outNNon / $outNNoff
fn set_relay(input: &[u8]) -> IResult<&[u8], Request> {
    let (rest, _) = tag("$out")(input)?;
    if input.len() < RELAY_MIN_LEN {
        return Err(nom::Err::Error((input, ErrorKind::Eof)));
    }
    let (_, field) = take(2usize)(rest)?;
    let switch = if input.ends_with(b"on") {
        Switch::On
    } else {
        Switch::Off
    };
    let request = match number(field) {
        Ok(n) => match RelayId::new(n) {
            Some(relay) => Request::SetRelay(relay, switch),
            None => Request::InvalidRelay(Rejection::OutOfRange(n)),
        },
        Err(rejection) => Request::InvalidRelay(rejection),
    };
    Ok((&input[input.len()..], request))
}

// $inNN
fn read_input(input: &[u8]) -> IResult<&[u8], Request> {
    let (rest, _) = tag("$in")(input)?;
    if input.len() < INPUT_MIN_LEN {
        return Err(nom::Err::Error((input, ErrorKind::Eof)));
    }
    let (_, field) = take(2usize)(rest)?;
    let request = match number(field) {
        Ok(n) => match InputId::new(n) {
            Some(id) => Request::ReadInput(id),
            None => Request::InvalidInput(Rejection::OutOfRange(n)),
        },
        Err(rejection) => Request::InvalidInput(rejection),
    };
    Ok((&input[input.len()..], request))
}

/// Leading decimal digits of a two-byte id field, after optional spaces and `+`.
fn number(field: &[u8]) -> Result<u8, Rejection> {
    let digits: IResult<&[u8], &[u8]> = preceded(space0, preceded(opt(char('+')), digit1))(field);
    match digits {
        Ok((_, digits)) => Ok(digits
            .iter()
            .fold(0u8, |acc, d| acc.saturating_mul(10).saturating_add(d - b'0'))),
        Err(_) => Err(Rejection::NotANumber),
    }
}
