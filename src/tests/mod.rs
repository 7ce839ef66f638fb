#[cfg(test)]
mod test_migrate;
#[cfg(test)]
mod test_template;
