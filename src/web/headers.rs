use headers::{Header, HeaderName, HeaderValue};

static FILENAME: HeaderName = HeaderName::from_static("filename");
static PAGE: HeaderName = HeaderName::from_static("page");

/// `Filename` request header carrying the client's original file name,
/// including its extension.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Filename(pub String);

impl Header for Filename {
    fn name() -> &'static HeaderName {
        &FILENAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let name = value.to_str().map_err(|_| headers::Error::invalid())?;
        if name.is_empty() {
            return Err(headers::Error::invalid());
        }

        Ok(Filename(name.to_owned()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

/// `Page` request header: 1-based page number for listings.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Page(pub u32);

impl Header for Page {
    fn name() -> &'static HeaderName {
        &PAGE
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let page: u32 = value
            .to_str()
            .map_err(|_| headers::Error::invalid())?
            .trim()
            .parse()
            .map_err(|_| headers::Error::invalid())?;
        if page == 0 {
            return Err(headers::Error::invalid());
        }

        Ok(Page(page))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_str(&self.0.to_string()) {
            values.extend(std::iter::once(value));
        }
    }
}
