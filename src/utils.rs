use super::*;

pub(crate) fn decode_entities(text: &str) -> String {
  html_escape::decode_html_entities(text).into_owned()
}

pub(crate) fn deserialize_edited<'de, D>(
  deserializer: D,
) -> Result<Edited, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null | Value::Bool(false)) => Ok(Edited::Never),
    Some(Value::Bool(true)) => Ok(Edited::Unknown),
    Some(Value::Number(n)) => n.as_f64().map(Edited::At).ok_or_else(|| {
      de::Error::invalid_value(Unexpected::Other("number"), &"epoch seconds")
    }),
    Some(Value::String(s)) => Err(de::Error::invalid_type(
      Unexpected::Str(&s),
      &"bool or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"bool or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"bool or number",
    )),
  }
}

/// Replies come as an empty string when there are none, a listing otherwise.
pub(crate) fn deserialize_replies<'de, D>(
  deserializer: D,
) -> Result<Vec<RawNode>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null | Value::Bool(false)) => Ok(Vec::new()),
    Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
    Some(value @ Value::Object(_)) => Listing::<RawNode>::deserialize(value)
      .map(|listing| listing.data.children)
      .map_err(de::Error::custom),
    Some(Value::String(s)) => Err(de::Error::invalid_value(
      Unexpected::Str(&s),
      &"empty string or listing",
    )),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"empty string or listing",
    )),
    Some(Value::Number(_)) => Err(de::Error::invalid_type(
      Unexpected::Other("number"),
      &"empty string or listing",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"empty string or listing",
    )),
  }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn format_timestamp(seconds: f64) -> String {
  chrono::DateTime::from_timestamp(seconds.trunc() as i64, 0).map_or_else(
    || seconds.to_string(),
    |time| time.format("[%Y-%m-%d %a %H:%M]").to_string(),
  )
}

pub(crate) fn is_truthy(value: &str) -> bool {
  matches!(
    value.trim().to_ascii_lowercase().as_str(),
    "1" | "true" | "yes" | "on"
  )
}

/// Wraps each line on its own, keeping single blank lines between
/// paragraphs.
pub(crate) fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for line in text.lines() {
    if line.trim().is_empty() {
      if lines.last().is_some_and(|last: &String| !last.is_empty()) {
        lines.push(String::new());
      }

      continue;
    }

    lines.extend(wrap_text(line, width));
  }

  while lines.last().is_some_and(String::is_empty) {
    lines.pop();
  }

  lines
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
