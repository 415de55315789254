mod credential_tests;
