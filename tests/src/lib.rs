#[cfg(test)]
mod poller;
#[cfg(test)]
mod utils;
