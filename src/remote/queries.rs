pub const SEARCH_HEARINGS_BY_FILENUMBER: &str = r#"
query SearchHearingsByCourtFileNumber($courtFileNumber: String!) {
  hearings(courtFileNumber: $courtFileNumber) {
    id
    courtFileNumber
    partyName
    lawyer
    hearingType
    dateTime
    dateTimeOffset
    court {
      name
      courtBranch
      courtType
    }
  }
}
"#;

pub const IS_SUBSCRIBED_TO: &str = r#"
query IsSubscribedTo($courtFileNumber: String!) {
  isSubscribedTo(courtFileNumber: $courtFileNumber)
}
"#;

pub const ADD_HEARING: &str = r#"
mutation AddHearings($hearings: [ClientDBHearingInput!]!) {
  addHearings(hearings: $hearings)
}
"#;

pub const UNSUBSCRIBE_HEARING: &str = r#"
mutation UnsubscribeHearing($courtFileNumber: String!) {
  unsubscribeHearing(courtFileNumber: $courtFileNumber)
}
"#;

pub const SET_VIEWED: &str = r#"
mutation SetViewed($courtFileNumber: String!) {
  setViewed(courtFileNumber: $courtFileNumber)
}
"#;
