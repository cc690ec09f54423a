// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::FeedPair;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReceiverError {
    #[error("Receiver {receiver} has no feed {feed}")]
    NoSuchFeed { receiver: String, feed: usize },

    #[error("Receiver {0} has a single feed; feed pairs are meaningless")]
    SingleFeed(String),

    #[error("Receiver {0} has no table of valid feed pairs")]
    NoValidPairs(String),

    #[error("Feed {feed} is not part of the pair {pair}")]
    FeedNotInPair { feed: usize, pair: FeedPair },

    #[error("Feed pair {0} is not valid at any derotator angle")]
    InvalidPair(FeedPair),

    #[error("Unknown radiotelescope '{0}'")]
    UnknownRadiotelescope(String),

    #[error("Radiotelescope {telescope} has no receiver '{receiver}'")]
    UnknownReceiver { telescope: String, receiver: String },
}
