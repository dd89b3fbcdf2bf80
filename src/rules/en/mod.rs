mod rules;

pub(crate) use rules::get;

#[cfg(test)]
mod tests;
